use super::{create_feature_extractor, create_head, CnnConfig};
use crate::model::SubModel;
use anyhow::Result;
use candle_core::{Device, Tensor};
use candle_nn::{sequential::Sequential, Module, VarBuilder};

/// Convolutional network producing action-values directly.
pub struct Cnn {
    device: Device,
    features: Sequential,
    head: Sequential,
}

impl SubModel for Cnn {
    type Config = CnnConfig;

    fn build(vb: VarBuilder, config: &Self::Config) -> Result<Self> {
        let feature_dim = config.feature_dim()?;
        let device = vb.device().clone();
        let features = create_feature_extractor(&vb.pp("features"))?;
        let head = create_head(&vb.pp("q"), feature_dim, &config.units, config.out_dim)?;

        Ok(Self {
            device,
            features,
            head,
        })
    }

    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        let xs = self.features.forward(&xs.to_device(&self.device)?)?;
        Ok(self.head.forward(&xs)?)
    }
}
