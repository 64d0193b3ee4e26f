// petrovol\crates\pv_surface\src/registry.rs

//! 面注册表
//!
//! 以新类型 ID 为键的显式映射，替代自由形态的字典状态。
//! 调用方（如导入层）注册散点面后拿到 `SurfaceId`，
//! 体积计算通过 ID 解析面引用。

use crate::error::{SurfaceError, SurfaceResult};
use crate::surface::SpatialSurface;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// 面 ID（新类型封装 UUID）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(Uuid);

impl SurfaceId {
    /// 生成新的面 ID
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// 从 UUID 创建
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 获取内部 UUID
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SurfaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SurfaceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// 面注册表
///
/// `SurfaceId -> SpatialSurface` 的显式映射。注册表随一次
/// 计算会话存在，不跨会话持久化。
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    surfaces: HashMap<SurfaceId, SpatialSurface>,
}

impl SurfaceRegistry {
    /// 创建空注册表
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册面，返回新分配的 ID
    pub fn insert(&mut self, surface: SpatialSurface) -> SurfaceId {
        let id = SurfaceId::new();
        self.surfaces.insert(id, surface);
        id
    }

    /// 按 ID 查找
    #[must_use]
    pub fn get(&self, id: SurfaceId) -> Option<&SpatialSurface> {
        self.surfaces.get(&id)
    }

    /// 按 ID 查找，未找到返回错误
    pub fn resolve(&self, id: SurfaceId) -> SurfaceResult<&SpatialSurface> {
        self.surfaces
            .get(&id)
            .ok_or(SurfaceError::SurfaceNotFound { id })
    }

    /// 移除面
    pub fn remove(&mut self, id: SurfaceId) -> Option<SpatialSurface> {
        self.surfaces.remove(&id)
    }

    /// 注册的面数量
    #[must_use]
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// 是否为空
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// 迭代所有 (ID, 面)
    pub fn iter(&self) -> impl Iterator<Item = (&SurfaceId, &SpatialSurface)> {
        self.surfaces.iter()
    }
}

// ============================================================================
// 测试
// ============================================================================
