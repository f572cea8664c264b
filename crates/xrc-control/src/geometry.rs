//! 几何工具函数
//!
//! 仿真器水平面为 X/Z，航向角为绕 Y 轴的欧拉角（度）。
//! 所有角度在这里统一归一化到 (-180, 180]。

use xrc_protocol::{RigidBodyPose, Vector3};

/// 将角度归一化到 (-180, 180]
///
/// 支持任意圈数的输入；对已归一化的角度是恒等映射（幂等）。
/// NaN / 无穷大原样返回。
///
/// # 示例
///
/// ```rust
/// use xrc_control::geometry::wrap_deg;
///
/// assert_eq!(wrap_deg(190.0), -170.0);
/// assert_eq!(wrap_deg(-180.0), 180.0);
/// assert_eq!(wrap_deg(725.0), 5.0);
/// ```
pub fn wrap_deg(angle: f64) -> f64 {
    if !angle.is_finite() {
        return angle;
    }
    // `%` 保留被除数符号，结果落在 (-360, 360)
    let a = angle % 360.0;
    if a > 180.0 {
        a - 360.0
    } else if a <= -180.0 {
        a + 360.0
    } else {
        a
    }
}

/// 目标相对于自身航向的方位角（度）
///
/// `delta` 为参考点与目标之间的位移向量，`heading` 为自身航向。
pub fn bearing_deg(delta: Vector3, heading: f64) -> f64 {
    wrap_deg(delta.x.atan2(delta.z).to_degrees() - heading)
}

/// 双侧进球口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntakeSide {
    Left,
    Right,
}

/// 将方位角折叠到两个背靠背的进球口上
///
/// 方位角超过 ±90° 时由左侧进球口负责，并将角度平移 180° 回到 [-90, 90]。
pub fn fold_dual_intake(bearing: f64) -> (f64, IntakeSide) {
    if bearing > 90.0 {
        (bearing - 180.0, IntakeSide::Left)
    } else if bearing < -90.0 {
        (bearing + 180.0, IntakeSide::Left)
    } else {
        (bearing, IntakeSide::Right)
    }
}

/// 最近对象搜索结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest<'a> {
    pub pose: &'a RigidBodyPose,
    /// `point - candidate`
    pub delta: Vector3,
    pub distance: f64,
}

/// 最近对象搜索
///
/// 排除条件：
/// - `distance < exclusion_radius`（已经在机器人里）
/// - `(point - candidate).y < height_cutoff`（仅 Y 轴的单向过滤，不是三维判断）
///
/// 没有全局位置的候选对象被跳过。距离相同时保留最先扫描到的对象。
/// 没有符合条件的对象时返回 `None`。
pub fn nearest<'a>(
    point: Vector3,
    candidates: impl IntoIterator<Item = &'a RigidBodyPose>,
    exclusion_radius: f64,
    height_cutoff: f64,
) -> Option<Nearest<'a>> {
    let mut best: Option<Nearest<'a>> = None;
    for pose in candidates {
        let Some(position) = pose.global_position else {
            continue;
        };
        let delta = point - position;
        let distance = delta.magnitude();
        if distance < exclusion_radius || delta.y < height_cutoff {
            continue;
        }
        if best.is_none_or(|b| distance < b.distance) {
            best = Some(Nearest { pose, delta, distance });
        }
    }
    best
}

/// 距离严格小于 `radius` 的所有对象
pub fn within<'a>(
    point: Vector3,
    candidates: impl IntoIterator<Item = &'a RigidBodyPose>,
    radius: f64,
) -> Vec<&'a RigidBodyPose> {
    candidates
        .into_iter()
        .filter(|pose| pose.global_position.is_some_and(|p| point.distance_to(p) < radius))
        .collect()
}
