//! Utilities.
use anyhow::{anyhow, Result};
use candle_core::{backprop::GradStore, Device, Tensor, Var};
use candle_nn::VarMap;
use log::trace;
use serpent_core::{error::SerpentError, Observation};

/// Apply soft update on variables.
///
/// Variables are identified by their names.
///
/// dest = tau * src + (1.0 - tau) * dest
pub fn track(dest: &VarMap, src: &VarMap, tau: f64) -> Result<()> {
    let dest = dest.data().lock().map_err(|_| anyhow!("poisoned lock on VarMap"))?;
    let src = src.data().lock().map_err(|_| anyhow!("poisoned lock on VarMap"))?;

    for (k, v_dest) in dest.iter() {
        let v_src = src
            .get(k)
            .ok_or_else(|| SerpentError::Configuration(format!("no parameter {} to track", k)))?;
        let t_dest = ((tau * v_src.as_tensor())? + (1.0 - tau) * v_dest.as_tensor())?;
        v_dest.set(&t_dest)?;
    }
    trace!("Soft update with tau = {}", tau);

    Ok(())
}

/// Copies every variable of `src` into the variable of `dest` with the same name.
pub fn copy_params(dest: &VarMap, src: &VarMap) -> Result<()> {
    let dest = dest.data().lock().map_err(|_| anyhow!("poisoned lock on VarMap"))?;
    let src = src.data().lock().map_err(|_| anyhow!("poisoned lock on VarMap"))?;

    for (k, v_dest) in dest.iter() {
        let v_src = src
            .get(k)
            .ok_or_else(|| SerpentError::Configuration(format!("no parameter {} to copy", k)))?;
        v_dest.set(v_src.as_tensor())?;
    }

    Ok(())
}

/// Rescales the gradients of `vars` so that their global L2 norm is at most `max_norm`.
///
/// Returns the norm before clipping.
pub fn clip_grad_norm(grads: &mut GradStore, vars: &[Var], max_norm: f64) -> Result<f32> {
    let mut sq_sum = 0f32;
    for var in vars.iter() {
        if let Some(g) = grads.get(var.as_tensor()) {
            sq_sum += g.sqr()?.sum_all()?.to_scalar::<f32>()?;
        }
    }
    let total_norm = sq_sum.sqrt();

    let coef = max_norm / (total_norm as f64 + 1e-6);
    if coef < 1.0 {
        for var in vars.iter() {
            if let Some(g) = grads.get(var.as_tensor()) {
                let g = (g * coef)?;
                grads.insert(var.as_tensor(), g);
            }
        }
    }

    Ok(total_norm)
}

/// Stacks observations into a tensor of shape `[N, 1, S, S]`.
pub fn observations_to_tensor(obs: &[Observation], device: &Device) -> Result<Tensor> {
    let size = match obs.first() {
        Some(o) => o.size(),
        None => return Err(SerpentError::EmptyBatch.into()),
    };
    let data = obs
        .iter()
        .flat_map(|o| o.as_slice().iter().copied())
        .collect::<Vec<_>>();
    Ok(Tensor::from_vec(data, (obs.len(), 1, size, size), device)?)
}

/// Index of the first maximal value.
pub fn argmax(values: &[f32]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::DType;
    use candle_nn::Init;

    fn varmap_with(values: &[f32]) -> Result<VarMap> {
        let vm = VarMap::new();
        let init = Init::Randn {
            mean: 0.0,
            stdev: 1.0,
        };
        vm.get((values.len(),), "var1", init, DType::F32, &Device::Cpu)?;
        let t = Tensor::from_slice(values, (values.len(),), &Device::Cpu)?;
        vm.data().lock().unwrap().get("var1").unwrap().set(&t)?;
        Ok(vm)
    }

    fn var1(vm: &VarMap) -> Tensor {
        vm.data()
            .lock()
            .unwrap()
            .get("var1")
            .unwrap()
            .as_tensor()
            .copy()
            .unwrap()
    }

    #[test]
    fn test_track() -> Result<()> {
        let tau = 0.01;
        let vm_src = varmap_with(&[1.0, 2.0, 3.0])?;
        let vm_dest = varmap_with(&[4.0, 5.0, 6.0])?;
        let expected = ((tau * &var1(&vm_src))? + (1.0 - tau) * &var1(&vm_dest))?;

        track(&vm_dest, &vm_src, tau)?;

        assert_eq!(var1(&vm_dest).to_vec1::<f32>()?, expected.to_vec1::<f32>()?);
        // Source is untouched.
        assert_eq!(var1(&vm_src).to_vec1::<f32>()?, vec![1.0, 2.0, 3.0]);
        Ok(())
    }

    #[test]
    fn test_copy_params() -> Result<()> {
        let vm_src = varmap_with(&[1.0, 2.0])?;
        let vm_dest = varmap_with(&[7.0, 8.0])?;
        copy_params(&vm_dest, &vm_src)?;
        assert_eq!(var1(&vm_dest).to_vec1::<f32>()?, vec![1.0, 2.0]);

        // The copy does not share storage with the source.
        track(&vm_src, &varmap_with(&[0.0, 0.0])?, 1.0)?;
        assert_eq!(var1(&vm_dest).to_vec1::<f32>()?, vec![1.0, 2.0]);
        Ok(())
    }

    #[test]
    fn test_clip_grad_norm() -> Result<()> {
        let var = Var::from_tensor(&Tensor::from_slice(&[1f32, 1.0, 1.0, 1.0], (4,), &Device::Cpu)?)?;
        let loss = (var.as_tensor() * 10.0)?.sum_all()?;
        let mut grads = loss.backward()?;

        let norm = clip_grad_norm(&mut grads, &[var.clone()], 1.0)?;
        assert!((norm - 20.0).abs() < 1e-4);

        let g = grads.get(var.as_tensor()).unwrap();
        let clipped = g.sqr()?.sum_all()?.sqrt()?.to_scalar::<f32>()?;
        assert!((clipped - 1.0).abs() < 1e-4);

        // A norm below the threshold is left alone.
        let norm = clip_grad_norm(&mut grads, &[var.clone()], 5.0)?;
        assert!((norm - 1.0).abs() < 1e-4);
        let g = grads.get(var.as_tensor()).unwrap().to_vec1::<f32>()?;
        assert!(g.iter().all(|v| (v - 0.5).abs() < 1e-4));
        Ok(())
    }

    #[test]
    fn test_observations_to_tensor() -> Result<()> {
        let o1 = Observation::new(2, vec![0.0, 0.1, 0.2, 0.3])?;
        let o2 = Observation::new(2, vec![1.0, 0.9, 0.8, 0.7])?;
        let t = observations_to_tensor(&[o1, o2], &Device::Cpu)?;
        assert_eq!(t.dims(), &[2, 1, 2, 2]);
        assert_eq!(t.flatten_all()?.to_vec1::<f32>()?[4], 1.0);
        assert!(observations_to_tensor(&[], &Device::Cpu).is_err());
        Ok(())
    }

    #[test]
    fn test_argmax() {
        assert_eq!(argmax(&[1.0, 2.0, 0.0, 3.0]), Some(3));
        assert_eq!(argmax(&[5.0, 5.0, 1.0]), Some(0));
        assert_eq!(argmax(&[]), None);
    }
}
