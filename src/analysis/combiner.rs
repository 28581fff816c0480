//! # 合并估计与分子常数推导
//!
//! ```text
//! B_cm = (B_spacing + B_gradient) / 2
//! B    = 100 · B_cm                       (m⁻¹)
//! I    = h / (8 c B π²)
//! r_CH4 = sqrt(3 I / (8 m_H))             甲烷对称构型
//! r_CO  = sqrt(I / (6.857 m_u))           双原子 (C–O) 构型
//! ```
//!
//! 每一步都传播标准误差。
//!
//! ## 依赖关系
//! - 被 `analysis/pipeline.rs` 调用
//! - 使用 `analysis/constants.rs`

use crate::analysis::constants::{
    ATOMIC_MASS_UNIT, CO_REDUCED_MASS_U, HYDROGEN_MASS, PLANCK, SPEED_OF_LIGHT,
};
use crate::error::{Result, RovibError};
use crate::models::{Estimate, Method, UncertainValue};

use std::f64::consts::PI;

/// 推导出的分子常数
#[derive(Debug, Clone, Copy)]
pub struct MolecularConstants {
    /// 最终 B (cm⁻¹)
    pub b_cm: Estimate,
    /// 最终 B (m⁻¹)
    pub b_m: UncertainValue,
    /// 转动惯量 (kg·m²)
    pub moment_of_inertia: UncertainValue,
    /// 甲烷对称构型下的 C–H 键长 (m)
    pub bond_length_methane: UncertainValue,
    /// 双原子构型下的键长 (m)
    pub bond_length_diatomic: UncertainValue,
}

/// 由间距法和梯度法估计推导分子常数
pub fn derive_constants(spacing: &Estimate, gradient: &Estimate) -> Result<MolecularConstants> {
    let b_cm = Estimate::combine(Method::Combined, spacing, gradient);

    if !b_cm.b.is_finite() || b_cm.b.value <= 0.0 {
        return Err(RovibError::InvalidInput(format!(
            "rotational constant must be positive and finite, got {} cm⁻¹",
            b_cm.b.value
        )));
    }

    let b_m = b_cm.b * 100.0;
    let moment_of_inertia = b_m.inverse_scaled(PLANCK / (8.0 * SPEED_OF_LIGHT * PI * PI));
    let bond_length_methane = (moment_of_inertia * (3.0 / (8.0 * HYDROGEN_MASS))).sqrt();
    let bond_length_diatomic = (moment_of_inertia / (CO_REDUCED_MASS_U * ATOMIC_MASS_UNIT)).sqrt();

    log::info!(
        "B = {} cm⁻¹, I = {:e} kg m²",
        b_cm.b,
        moment_of_inertia.value
    );

    Ok(MolecularConstants {
        b_cm,
        b_m,
        moment_of_inertia,
        bond_length_methane,
        bond_length_diatomic,
    })
}
