use super::{NetworkShape, ValueEstimatorConfig};
use crate::{
    cnn::{Cnn, DuelingCnn},
    model::SubModel,
    opt::Optimizer,
    util::{argmax, clip_grad_norm, copy_params, observations_to_tensor},
};
use anyhow::Result;
use candle_core::{DType, Device, Tensor};
use candle_nn::{VarBuilder, VarMap};
use log::info;
use serpent_core::{error::SerpentError, Direction, Observation};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Suffix of the files holding the parameters.
const PARAMS_SUFFIX: &str = "safetensors";

enum Network {
    Plain(Cnn),
    Dueling(DuelingCnn),
}

impl Network {
    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        match self {
            Self::Plain(net) => net.forward(xs),
            Self::Dueling(net) => net.forward(xs),
        }
    }
}

/// Maps observations to the values of the four directions.
///
/// The estimator owns its parameters in a [`VarMap`] together with the
/// optimizer updating them. Two estimators built from the same
/// configuration have parameters with the same names and shapes, so one
/// can be blended into the other with [`track`](crate::util::track).
pub struct ValueEstimator {
    device: Device,
    varmap: VarMap,
    network: Network,
    config: ValueEstimatorConfig,
    opt: Optimizer,
}

impl ValueEstimator {
    /// Constructs [`ValueEstimator`] with freshly initialized parameters.
    pub fn build(config: ValueEstimatorConfig, device: Device) -> Result<Self> {
        let varmap = VarMap::new();
        let network = {
            let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
            match config.shape {
                NetworkShape::Plain => Network::Plain(Cnn::build(vb, &config.cnn_config)?),
                NetworkShape::Dueling => {
                    Network::Dueling(DuelingCnn::build(vb, &config.cnn_config)?)
                }
            }
        };
        let opt = config.opt_config.build(varmap.all_vars())?;

        Ok(Self {
            device,
            varmap,
            network,
            config,
            opt,
        })
    }

    /// Constructs an estimator of the same shape holding a copy of the parameters.
    ///
    /// The copy does not share storage with `self` and starts with a fresh optimizer.
    pub fn duplicate(&self) -> Result<Self> {
        let estimator = Self::build(self.config.clone(), self.device.clone())?;
        copy_params(&estimator.varmap, &self.varmap)?;
        Ok(estimator)
    }

    /// Action-values of a batch `[N, 1, S, S]`, tracked for backpropagation.
    pub fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        self.network.forward(xs)
    }

    /// Action-values of a batch, detached from the computation graph.
    pub fn evaluate(&self, xs: &Tensor) -> Result<Tensor> {
        Ok(self.network.forward(xs)?.detach())
    }

    /// Action-values of a batch of observations.
    pub fn evaluate_observations(&self, obs: &[Observation]) -> Result<Tensor> {
        let xs = observations_to_tensor(obs, &self.device)?;
        self.evaluate(&xs)
    }

    /// The direction with the largest value for the given observation.
    pub fn best_direction(&self, obs: &Observation) -> Result<Direction> {
        let q = self
            .evaluate_observations(std::slice::from_ref(obs))?
            .squeeze(0)?
            .to_vec1::<f32>()?;
        let ix = argmax(&q).ok_or(SerpentError::EmptyBatch)?;
        Ok(Direction::try_from(ix)?)
    }

    /// Backpropagates the loss, clips the gradient norm if asked and updates the parameters.
    pub fn backward_step(&mut self, loss: &Tensor, max_grad_norm: Option<f64>) -> Result<()> {
        let mut grads = loss.backward()?;
        if let Some(max_norm) = max_grad_norm {
            clip_grad_norm(&mut grads, &self.varmap.all_vars(), max_norm)?;
        }
        self.opt.step(&grads)
    }

    /// The parameters.
    pub fn get_varmap(&self) -> &VarMap {
        &self.varmap
    }

    /// The device the parameters live on.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Shape of the network.
    pub fn shape(&self) -> NetworkShape {
        self.config.shape
    }

    /// Path of the parameter file for the given name.
    pub fn params_path(name: impl AsRef<Path>) -> PathBuf {
        let mut path = name.as_ref().as_os_str().to_owned();
        path.push(".");
        path.push(PARAMS_SUFFIX);
        PathBuf::from(path)
    }

    /// Saves the parameters to `<name>.safetensors` and returns the path.
    ///
    /// Missing parent directories are created.
    pub fn save(&self, name: impl AsRef<Path>) -> Result<PathBuf> {
        let path = Self::params_path(name);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        self.varmap.save(&path)?;
        info!("Save value estimator to {:?}", path);
        Ok(path)
    }

    /// Loads the parameters from `<name>.safetensors`.
    ///
    /// A file written by a network of another shape or input size is a
    /// [`SerpentError::Configuration`] error.
    pub fn load(&mut self, name: impl AsRef<Path>) -> Result<()> {
        let path = Self::params_path(name);
        if !path.is_file() {
            return Err(SerpentError::Configuration(format!("no checkpoint at {:?}", path)).into());
        }
        self.varmap.load(&path).map_err(|e| {
            SerpentError::Configuration(format!(
                "checkpoint {:?} does not match the {} network: {}",
                path, self.config.shape, e
            ))
        })?;
        info!("Load value estimator from {:?}", path);
        Ok(())
    }
}
