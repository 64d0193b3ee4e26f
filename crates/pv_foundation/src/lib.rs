// petrovol\crates\pv_foundation\src/lib.rs

//! PetroVol 基础层
//!
//! 提供整个项目共享的错误类型与验证宏。
//!
//! # 模块
//!
//! - `error`: 统一错误类型 `PvError` / `PvResult`
//!
//! # 示例
//!
//! ```
//! use pv_foundation::{ensure, PvError, PvResult};
//!
//! fn validate_thickness(h: f64) -> PvResult<()> {
//!     ensure!(h >= 0.0, PvError::invalid_input("厚度不能为负"));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

pub use error::{PvError, PvResult};

/// 检查条件，不满足则提前返回错误
///
/// # 示例
///
/// ```
/// use pv_foundation::{ensure, PvError, PvResult};
///
/// fn check(v: f64) -> PvResult<()> {
///     ensure!(v.is_finite(), PvError::invalid_input("非有限数"));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}

/// 解包 `Option`，为 `None` 时提前返回错误
#[macro_export]
macro_rules! require {
    ($opt:expr, $err:expr) => {
        match $opt {
            Some(v) => v,
            None => return Err($err.into()),
        }
    };
}
