//! 几何量缓存
//!
//! `GeometryCache` 借用一个 [`WorldSnapshot`]，按需计算并缓存本 tick 的几何量。
//! 生命周期参数保证缓存不会比快照活得更久，也就不可能跨 tick 复用。
//!
//! 每个量在第一次访问时计算，之后直接返回缓存值（至多计算一次）。

use crate::geometry::{self, IntakeSide};
use std::cell::OnceCell;
use std::time::Instant;
use xrc_protocol::{RigidBodyPose, WorldSnapshot};

/// 已收入机器人的判定半径（米）
pub const CAPTURE_RADIUS: f64 = 0.4;

/// 最近元素搜索的高度过滤阈值（米）
pub const HEIGHT_CUTOFF: f64 = -0.5;

/// 相对场地中心（Hub）的几何量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HubGeometry {
    /// 水平距离（米）
    pub distance: f64,
    /// 从 Hub 看向机器人的方位角（度）
    pub angle_from_hub: f64,
    /// 机器人转向 Hub 需要的角度（度，(-180, 180]）
    pub angle_to_hub: f64,
}

/// 最近的可收取元素
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceTarget<'a> {
    pub pose: &'a RigidBodyPose,
    /// 折叠到负责进球口后的方位角，[-90, 90]
    pub bearing_deg: f64,
    /// 折叠前的方位角，(-180, 180]
    pub raw_bearing_deg: f64,
    pub distance: f64,
    pub side: IntakeSide,
}

/// 单个快照作用域内的几何量缓存
#[derive(Debug)]
pub struct GeometryCache<'a> {
    snapshot: &'a WorldSnapshot,
    /// 本 tick 的时间戳（计时器与限频控制器共用）
    now: Instant,
    hub: OnceCell<Option<HubGeometry>>,
    nearest_piece: OnceCell<Option<PieceTarget<'a>>>,
    pieces_in_robot: OnceCell<Vec<&'a RigidBodyPose>>,
}

impl<'a> GeometryCache<'a> {
    pub fn new(snapshot: &'a WorldSnapshot) -> Self {
        GeometryCache::at(snapshot, Instant::now())
    }

    /// 以给定时间戳创建（测试用显式时间）
    pub fn at(snapshot: &'a WorldSnapshot, now: Instant) -> Self {
        GeometryCache {
            snapshot,
            now,
            hub: OnceCell::new(),
            nearest_piece: OnceCell::new(),
            pieces_in_robot: OnceCell::new(),
        }
    }

    /// 产生此缓存的快照
    pub fn snapshot(&self) -> &'a WorldSnapshot {
        self.snapshot
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// 相对 Hub（场地原点）的几何量
    ///
    /// 车体缺少全局位置或航向时返回 `None`。
    pub fn hub(&self) -> Option<HubGeometry> {
        *self.hub.get_or_init(|| {
            let robot = self.snapshot.robot();
            let position = robot.body_position()?;
            let heading = robot.heading_deg()?;

            let angle_from_hub = position.x.atan2(position.z).to_degrees();
            Some(HubGeometry {
                distance: position.horizontal_magnitude(),
                angle_from_hub,
                angle_to_hub: geometry::wrap_deg(angle_from_hub - heading + 90.0),
            })
        })
    }

    pub fn distance_to_hub(&self) -> Option<f64> {
        self.hub().map(|h| h.distance)
    }

    pub fn angle_from_hub(&self) -> Option<f64> {
        self.hub().map(|h| h.angle_from_hub)
    }

    pub fn angle_to_hub(&self) -> Option<f64> {
        self.hub().map(|h| h.angle_to_hub)
    }

    /// 本联盟最近的可收取元素
    ///
    /// 已在机器人内（< 0.4 m）或明显高于车体的元素不参与搜索。
    /// 没有符合条件的元素时返回 `None`，调用方必须处理这种情况。
    pub fn nearest_piece(&self) -> Option<PieceTarget<'a>> {
        *self.nearest_piece.get_or_init(|| {
            let robot = self.snapshot.robot();
            let position = robot.body_position()?;
            let heading = robot.heading_deg()?;

            let candidates = self.snapshot.elements().alliance_pieces(self.snapshot.alliance());
            let found = geometry::nearest(position, candidates, CAPTURE_RADIUS, HEIGHT_CUTOFF)?;

            let raw_bearing_deg = geometry::bearing_deg(found.delta, heading);
            let (bearing_deg, side) = geometry::fold_dual_intake(raw_bearing_deg);
            Some(PieceTarget {
                pose: found.pose,
                bearing_deg,
                raw_bearing_deg,
                distance: found.distance,
                side,
            })
        })
    }

    /// 已收入机器人的元素（不分联盟）
    pub fn pieces_in_robot(&self) -> &[&'a RigidBodyPose] {
        self.pieces_in_robot.get_or_init(|| {
            let snapshot: &'a WorldSnapshot = self.snapshot;
            match snapshot.robot().body_position() {
                Some(position) => {
                    geometry::within(position, snapshot.elements().all_pieces(), CAPTURE_RADIUS)
                },
                None => Vec::new(),
            }
        })
    }
}
