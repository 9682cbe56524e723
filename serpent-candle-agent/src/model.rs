//! Interface of neural networks used as action-value functions.
use anyhow::Result;
use candle_core::Tensor;
use candle_nn::VarBuilder;

/// Neural network model not owning its [`VarMap`] internally.
///
/// The parameters are created through the given [`VarBuilder`], so the
/// owner of the [`VarMap`] decides where they live and how they are saved.
///
/// [`VarMap`]: candle_nn::VarMap
pub trait SubModel {
    /// Configuration from which [`SubModel`] is constructed.
    type Config;

    /// Builds [`SubModel`] with [`VarBuilder`] and [`SubModel::Config`].
    fn build(vb: VarBuilder, config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Maps a batch of observations `[N, 1, S, S]` to outputs `[N, out_dim]`.
    fn forward(&self, xs: &Tensor) -> Result<Tensor>;
}
