//! # 物理常数
//!
//! CODATA 2018 推荐值（SI 单位）。

/// 普朗克常数 h (J·s)
pub const PLANCK: f64 = 6.626_070_15e-34;

/// 真空光速 c (m/s)
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// 原子质量单位 m_u (kg)
pub const ATOMIC_MASS_UNIT: f64 = 1.660_539_066_60e-27;

/// 氢原子质量 m_H (kg)
pub const HYDROGEN_MASS: f64 = 1.007_825_032_23 * ATOMIC_MASS_UNIT;

/// C–O 约化质量 12·16/(12+16)，以 m_u 为单位
pub const CO_REDUCED_MASS_U: f64 = 6.857;

/// nm → cm
pub const NM_TO_CM: f64 = 1e-7;

/// nm → m
pub const NM_TO_M: f64 = 1e-9;
