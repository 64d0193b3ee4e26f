// petrovol\crates\pv_sim\src/cancel.rs

//! 取消令牌
//!
//! 长时间运行的模拟周期性检查取消标志，被取消后立即停止迭代
//! 并返回部分结果状态。令牌可克隆后移交给其他线程触发取消。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 取消令牌
///
/// 内部为原子布尔标志的共享引用；克隆廉价，跨线程安全。
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// 创建未取消的令牌
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 触发取消
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// 是否已取消
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_flow() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());

        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancel_from_thread() {
        let token = CancelToken::new();
        let clone = token.clone();

        std::thread::spawn(move || clone.cancel())
            .join()
            .unwrap();
        assert!(token.is_cancelled());
    }
}
