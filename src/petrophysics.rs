// petrors-logs/src/petrophysics.rs
//! Per-sample petrophysical formulas.
//!
//! Every function returns `None` when a required input is missing and never
//! fails on degenerate geometry: division by zero or negative roots resolve
//! to the documented boundary value so one bad sample cannot stop a well.

use crate::params::ArchieParameters;

pub const MAX_POROSITY: f64 = 0.45;
pub const MAX_PERMEABILITY: f64 = 10_000.;

/// Gamma-ray index, clamped to [0, 1]. `None` when the normalisation range
/// is empty.
pub fn gamma_ray_index(gr: f64, gr_min: f64, gr_max: f64) -> Option<f64> {
    if !(gr_max > gr_min) {
        return None;
    }
    Some(((gr - gr_min) / (gr_max - gr_min)).clamp(0., 1.))
}

/// Larionov (tertiary rocks) shale volume.
///
/// `gr_min` and `gr_max` are the 2nd and 98th percentile of the well's
/// gamma ray.
pub fn shale_volume(gr: Option<f64>, gr_min: f64, gr_max: f64) -> Option<f64> {
    let igr = gamma_ray_index(gr?, gr_min, gr_max)?;
    Some((0.083 * (2f64.powf(3.7 * igr) - 1.)).clamp(0., 1.))
}

/// Density porosity with an optional shale correction, clamped to
/// [0, 0.45]. A missing `vsh` is treated as clean rock.
pub fn porosity_density(
    rhob: Option<f64>,
    rho_matrix: f64,
    rho_fluid: f64,
    vsh: Option<f64>,
    rho_shale: f64,
) -> Option<f64> {
    let rhob = rhob?;
    let span = rho_matrix - rho_fluid;
    if span == 0. {
        return None;
    }
    let vsh = vsh.unwrap_or(0.);
    let mut phi = (rho_matrix - rhob) / span;
    if vsh > 0. {
        phi -= vsh * (rho_matrix - rho_shale) / span;
    }
    Some(phi.clamp(0., MAX_POROSITY))
}

/// Neutron-density porosity.
///
/// Combines neutron porosity with the (clamped) density porosity as a root
/// mean square rather than an arithmetic mean, which dampens gas crossover.
pub fn porosity_neutron_density(
    nphi: Option<f64>,
    rhob: Option<f64>,
    rho_matrix: f64,
    rho_fluid: f64,
    vsh: Option<f64>,
    rho_shale: f64,
) -> Option<f64> {
    let nphi = nphi?;
    let phi_density = porosity_density(rhob, rho_matrix, rho_fluid, vsh, rho_shale)?;
    let rms = ((nphi * nphi + phi_density * phi_density) / 2.).sqrt();
    Some(rms.clamp(0., MAX_POROSITY))
}

pub fn effective_porosity(phi_total: Option<f64>, vsh: Option<f64>) -> Option<f64> {
    Some(phi_total? * (1. - vsh?))
}

/// Archie water saturation, clamped to [0, 1].
///
/// Non-positive porosity or resistivity means fully water saturated.
pub fn water_saturation(
    phi_e: Option<f64>,
    rt: Option<f64>,
    archie: &ArchieParameters,
    rw: f64,
) -> Option<f64> {
    let (phi_e, rt) = (phi_e?, rt?);
    if phi_e <= 0. || rt <= 0. {
        return Some(1.0);
    }
    let sw = (archie.a * rw / (phi_e.powf(archie.m) * rt)).powf(1. / archie.n);
    Some(sw.clamp(0., 1.))
}

/// Kozeny-type permeability proxy on a millidarcy-like scale.
///
/// Not a calibrated rock-physics model; the porosity is reduced by `vsh`
/// once more before the Kozeny term.
pub fn permeability_kozeny(phi: Option<f64>, vsh: Option<f64>) -> Option<f64> {
    let (phi, vsh) = (phi?, vsh?);
    if phi <= 0. {
        return Some(0.);
    }
    let phi_eff = phi * (1. - vsh);
    if phi_eff <= 0. || phi_eff >= 1. {
        return Some(0.);
    }
    let k = 100. * phi_eff.powi(3) / (1. - phi_eff).powi(2);
    Some(k.clamp(0., MAX_PERMEABILITY))
}
