//! # 带标准误差的数值
//!
//! 按独立误差的一阶传播规则实现运算：
//! - 加减：误差平方和开方
//! - 乘除常数：误差线性缩放
//! - 两个独立值取平均：平方和开方后减半
//! - `k / x`：相对误差不变
//! - 开方：σ / (2√x)
//!
//! ## 依赖关系
//! - 被 `analysis/` 各估计器和 `commands/analyze.rs` 使用

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// 数值及其标准误差
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UncertainValue {
    pub value: f64,
    pub stderr: f64,
}

impl UncertainValue {
    pub fn new(value: f64, stderr: f64) -> Self {
        UncertainValue {
            value,
            stderr: stderr.abs(),
        }
    }

    /// 无误差的精确值
    #[cfg(test)]
    pub fn exact(value: f64) -> Self {
        UncertainValue::new(value, 0.0)
    }

    /// 两个独立估计的平均值
    pub fn combine(a: UncertainValue, b: UncertainValue) -> UncertainValue {
        (a + b) / 2.0
    }

    /// 计算 `numerator / self`，numerator 为精确常数
    pub fn inverse_scaled(self, numerator: f64) -> UncertainValue {
        let value = numerator / self.value;
        UncertainValue::new(value, (value * self.stderr / self.value).abs())
    }

    /// 平方根
    pub fn sqrt(self) -> UncertainValue {
        let root = self.value.sqrt();
        let stderr = if self.stderr == 0.0 {
            0.0
        } else {
            self.stderr / (2.0 * root)
        };
        UncertainValue::new(root, stderr)
    }

    /// 相对误差
    pub fn relative_error(&self) -> f64 {
        if self.value == 0.0 {
            f64::INFINITY
        } else {
            (self.stderr / self.value).abs()
        }
    }

    pub fn is_finite(&self) -> bool {
        self.value.is_finite() && self.stderr.is_finite()
    }
}

impl Add for UncertainValue {
    type Output = UncertainValue;

    fn add(self, rhs: UncertainValue) -> UncertainValue {
        UncertainValue::new(self.value + rhs.value, self.stderr.hypot(rhs.stderr))
    }
}

impl Sub for UncertainValue {
    type Output = UncertainValue;

    fn sub(self, rhs: UncertainValue) -> UncertainValue {
        UncertainValue::new(self.value - rhs.value, self.stderr.hypot(rhs.stderr))
    }
}

impl Mul<f64> for UncertainValue {
    type Output = UncertainValue;

    fn mul(self, rhs: f64) -> UncertainValue {
        UncertainValue::new(self.value * rhs, self.stderr * rhs.abs())
    }
}

impl Div<f64> for UncertainValue {
    type Output = UncertainValue;

    fn div(self, rhs: f64) -> UncertainValue {
        UncertainValue::new(self.value / rhs, self.stderr / rhs.abs())
    }
}

impl fmt::Display for UncertainValue {
    /// 格式化为 `value ± stderr`，精度与科学计数法跟随格式参数
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) if f.alternate() => write!(f, "{:.*e} ± {:.*e}", p, self.value, p, self.stderr),
            Some(p) => write!(f, "{:.*} ± {:.*}", p, self.value, p, self.stderr),
            None if f.alternate() => write!(f, "{:e} ± {:e}", self.value, self.stderr),
            None => write!(f, "{} ± {}", self.value, self.stderr),
        }
    }
}
