//! Convolutional action-value networks.
//!
//! Both networks share the feature extractor: three 2D convolutions with
//! ReLU activations and a 2x2 max pooling after the second one, flattened
//! into a vector. [`Cnn`] puts one fully connected stack on top of it;
//! [`DuelingCnn`] puts two, one for the state value and one for the
//! advantages of the actions.
mod base;
mod config;
mod dueling;
pub use base::Cnn;
pub use config::CnnConfig;
pub use dueling::{combine_dueling, DuelingCnn};
use anyhow::Result;
use candle_nn::{
    conv2d, linear,
    sequential::{seq, Sequential},
    Conv2dConfig, VarBuilder,
};

fn create_feature_extractor(vb: &VarBuilder) -> Result<Sequential> {
    let seq = seq()
        .add(conv2d(1, 16, 5, Conv2dConfig::default(), vb.pp("c1"))?)
        .add_fn(|xs| xs.relu())
        .add(conv2d(16, 32, 3, Conv2dConfig::default(), vb.pp("c2"))?)
        .add_fn(|xs| xs.relu()?.max_pool2d(2))
        .add(conv2d(32, 64, 3, Conv2dConfig::default(), vb.pp("c3"))?)
        .add_fn(|xs| xs.relu()?.flatten_from(1));

    Ok(seq)
}

/// Fully connected layers with ReLU activations, no activation on the output.
fn create_head(vb: &VarBuilder, in_dim: usize, units: &[usize], out_dim: usize) -> Result<Sequential> {
    let mut seq = seq();
    let mut in_dim = in_dim;
    for (i, &u) in units.iter().enumerate() {
        seq = seq
            .add(linear(in_dim, u, vb.pp(format!("l{}", i)))?)
            .add_fn(|xs| xs.relu());
        in_dim = u;
    }
    let seq = seq.add(linear(in_dim, out_dim, vb.pp(format!("l{}", units.len())))?);

    Ok(seq)
}
