use super::{create_feature_extractor, create_head, CnnConfig};
use crate::model::SubModel;
use anyhow::Result;
use candle_core::{Device, Tensor, D};
use candle_nn::{sequential::Sequential, Module, VarBuilder};

/// Combines a state value `[N, 1]` and advantages `[N, A]` into action-values.
///
/// `q = v + a - mean(a)`, the mean being taken over the actions of each
/// sample. Adding a constant to every advantage of a sample leaves `q`
/// unchanged. The mean is never taken over the whole batch: the values of
/// a sample do not depend on the other samples of its batch.
pub fn combine_dueling(v: &Tensor, a: &Tensor) -> Result<Tensor> {
    let a_mean = a.mean_keepdim(D::Minus1)?;
    Ok(a.broadcast_sub(&a_mean)?.broadcast_add(v)?)
}

/// Convolutional network with separate state-value and advantage streams.
pub struct DuelingCnn {
    device: Device,
    features: Sequential,
    value: Sequential,
    advantage: Sequential,
}

impl SubModel for DuelingCnn {
    type Config = CnnConfig;

    fn build(vb: VarBuilder, config: &Self::Config) -> Result<Self> {
        let feature_dim = config.feature_dim()?;
        let device = vb.device().clone();
        let features = create_feature_extractor(&vb.pp("features"))?;
        let value = create_head(&vb.pp("value"), feature_dim, &config.units, 1)?;
        let advantage = create_head(&vb.pp("advantage"), feature_dim, &config.units, config.out_dim)?;

        Ok(Self {
            device,
            features,
            value,
            advantage,
        })
    }

    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        let xs = self.features.forward(&xs.to_device(&self.device)?)?;
        let v = self.value.forward(&xs)?;
        let a = self.advantage.forward(&xs)?;
        combine_dueling(&v, &a)
    }
}
