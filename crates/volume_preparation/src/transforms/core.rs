use anyhow::{Context, Result};
use std::marker::PhantomData;

/// One step of a volume preprocessing pipeline, turning an `I` into an `O`.
///
/// Volume transforms implement it as `Transform<Volume<T>, Volume<T>>` for any
/// element type. Steps compose left to right with `.then(...)`:
///
/// ```ignore
/// let pipeline = VolumeCenterCrop::cube(64)?
///     .then(RandomFlip3D::new())
///     .then(CentralSlice);
/// let out = pipeline.apply(volume)?;
/// ```
///
/// `then()` needs a concrete (`Sized`) receiver whose output matches the next
/// step's input; that type must be `Send` so pipelines can run on workers.
pub trait Transform<I, O>: Send + Sync {
    fn apply(&self, input: I) -> Result<O>;

    #[inline]
    fn then<T, M>(self, next: T) -> Chain<Self, T, O>
    where
        Self: Sized,
        T: Transform<O, M>,
        O: Send,
        M: Send,
    {
        Chain {
            first: self,
            second: next,
            _marker: PhantomData,
        }
    }
}

/// Boxed transforms come out of [`build_pipeline`](crate::transforms::volume::build_pipeline)
/// and can be chained like concrete ones.
impl<I, O> Transform<I, O> for Box<dyn Transform<I, O>> {
    fn apply(&self, input: I) -> Result<O> {
        (**self).apply(input)
    }
}

/// Two pipeline steps run back to back. `M` is the volume type handed from
/// `first` to `second`.
#[derive(Debug)]
pub struct Chain<A, B, M> {
    first: A,
    second: B,
    _marker: PhantomData<fn() -> M>,
}

impl<A, B, M> Chain<A, B, M> {
    /// Pairs two steps explicitly; [`build_pipeline`](crate::transforms::volume::build_pipeline)
    /// folds configured steps this way.
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<I, M, O, A, B> Transform<I, O> for Chain<A, B, M>
where
    A: Transform<I, M>,
    B: Transform<M, O>,
    M: Send,
{
    fn apply(&self, input: I) -> Result<O> {
        let stages = || {
            format!(
                "Volume pipeline step failed: {} → {}",
                std::any::type_name::<A>(),
                std::any::type_name::<B>()
            )
        };
        let mid = self.first.apply(input).with_context(stages)?;
        self.second.apply(mid).with_context(stages)
    }
}
