//! 联盟相关的区域判断
//!
//! 区域是若干个轴对齐矩形（[`Bounds`]）的并集，所有比较均为严格不等式。
//! 蓝方的区域是红方区域的坐标镜像，联盟未知时任何区域判断都为 false。

use xrc_protocol::{Alliance, Vector3};

/// 镜像方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirror {
    /// 仅翻转 Z（Charged Up 场地）
    Z,
    /// 翻转 X 与 Z（Rapid React 场地，中心对称）
    XZ,
}

/// 轴对齐矩形（开区间，`None` 表示该方向无限制）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub z_min: Option<f64>,
    pub z_max: Option<f64>,
}

impl Bounds {
    pub const fn new() -> Self {
        Bounds { x_min: None, x_max: None, z_min: None, z_max: None }
    }

    /// x > value
    pub const fn x_above(mut self, value: f64) -> Self {
        self.x_min = Some(value);
        self
    }

    /// x < value
    pub const fn x_below(mut self, value: f64) -> Self {
        self.x_max = Some(value);
        self
    }

    /// z > value
    pub const fn z_above(mut self, value: f64) -> Self {
        self.z_min = Some(value);
        self
    }

    /// z < value
    pub const fn z_below(mut self, value: f64) -> Self {
        self.z_max = Some(value);
        self
    }

    pub fn contains(&self, p: Vector3) -> bool {
        self.x_min.is_none_or(|v| p.x > v)
            && self.x_max.is_none_or(|v| p.x < v)
            && self.z_min.is_none_or(|v| p.z > v)
            && self.z_max.is_none_or(|v| p.z < v)
    }

    pub fn mirrored(&self, mirror: Mirror) -> Self {
        let flip_z = Bounds {
            z_min: self.z_max.map(|v| -v),
            z_max: self.z_min.map(|v| -v),
            ..*self
        };
        match mirror {
            Mirror::Z => flip_z,
            Mirror::XZ => Bounds {
                x_min: self.x_max.map(|v| -v),
                x_max: self.x_min.map(|v| -v),
                ..flip_z
            },
        }
    }
}

/// 若干矩形的并集
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Region {
    parts: Vec<Bounds>,
}

impl Region {
    pub fn new(parts: impl IntoIterator<Item = Bounds>) -> Self {
        Region { parts: parts.into_iter().collect() }
    }

    pub fn contains(&self, p: Vector3) -> bool {
        self.parts.iter().any(|b| b.contains(p))
    }

    pub fn mirrored(&self, mirror: Mirror) -> Self {
        Region { parts: self.parts.iter().map(|b| b.mirrored(mirror)).collect() }
    }
}

/// 按联盟区分的区域
#[derive(Debug, Clone, PartialEq)]
pub struct AllianceRegion {
    red: Region,
    blue: Region,
}

impl AllianceRegion {
    /// 以红方区域为基准，蓝方区域按 `mirror` 镜像得到
    pub fn from_red(red: Region, mirror: Mirror) -> Self {
        let blue = red.mirrored(mirror);
        AllianceRegion { red, blue }
    }

    pub fn contains(&self, alliance: Alliance, p: Vector3) -> bool {
        match alliance {
            Alliance::Red => self.red.contains(p),
            Alliance::Blue => self.blue.contains(p),
            Alliance::Neither => false,
        }
    }
}

// ==================== 场地区域表 ====================

/// Rapid React：本方机库
pub fn rapid_react_hangar() -> AllianceRegion {
    AllianceRegion::from_red(
        Region::new([Bounds::new().x_below(-0.875).z_below(-4.5)]),
        Mirror::XZ,
    )
}

/// Charged Up：装载区（取件站）
pub fn charged_up_loading_zone() -> AllianceRegion {
    AllianceRegion::from_red(
        Region::new([
            Bounds::new().z_above(2.0).x_above(3.15),
            Bounds::new().z_above(5.3).x_above(1.7),
        ]),
        Mirror::Z,
    )
}

/// Charged Up：社区（得分区）
pub fn charged_up_community() -> AllianceRegion {
    AllianceRegion::from_red(
        Region::new([
            Bounds::new().z_below(-3.8).x_below(-2.8),
            Bounds::new().z_below(-5.0).x_below(0.4),
            Bounds::new().z_below(-5.3).x_above(0.4).x_below(1.1),
        ]),
        Mirror::Z,
    )
}
