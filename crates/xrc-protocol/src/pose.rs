//! 刚体位姿
//!
//! 仿真器输出的每个对象（机器人部件或场地元素）都是一个 JSON 对象，
//! 字段可能缺失。缺失必须保留为 `None`，不能默认成零向量。

use crate::vector::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 机器人部件的语义角色
///
/// 在解析阶段由 [`RobotProfile`](crate::RobotProfile) 的角色表一次性绑定（名称完全匹配），
/// 之后所有查询都按角色进行，不再做名称子串匹配。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PoseRole {
    /// 车体（所有机器人都必须有）
    Body,

    // ==================== Rapid React ====================
    /// 射球罩（仿真器名称 `Indicator`）
    Hood,
    /// 左侧进球翻板
    LeftIntake,
    /// 右侧进球翻板
    RightIntake,
    ClimberArm1,
    ClimberArm2,
    ClimberHook1,
    ClimberHook2,

    // ==================== Charged Up ====================
    NotUpdated,
    /// 升降机构
    Lift,
    /// 伸缩滑台第一级
    Slide,
    /// 伸缩滑台第二级
    Slide2,
    Intake1,
    Intake2,
    Intake3,
    Intake4,
    LiftBuddy,
    BuddyHinge,
}

/// 刚体位姿
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RigidBodyPose {
    #[serde(default)]
    pub id: Option<i64>,

    /// 仿真器的对象类型编号；没有类型编号的对象归为杂项
    #[serde(default, rename = "type")]
    pub type_tag: Option<i64>,

    #[serde(default)]
    pub name: Option<String>,

    /// 解析后绑定的语义角色（不来自 JSON）
    #[serde(skip)]
    pub role: Option<PoseRole>,

    #[serde(default, rename = "global pos")]
    pub global_position: Option<Vector3>,

    /// 全局欧拉角（度）
    #[serde(default, rename = "global rot")]
    pub global_rotation: Option<Vector3>,

    #[serde(default, rename = "local pos")]
    pub local_position: Option<Vector3>,

    /// 局部欧拉角（度）
    #[serde(default, rename = "local rot")]
    pub local_rotation: Option<Vector3>,

    #[serde(default)]
    pub velocity: Option<Vector3>,

    #[serde(default, rename = "rot velocity")]
    pub angular_velocity: Option<Vector3>,
}

impl RigidBodyPose {
    /// 只带全局位置的位姿（主要用于测试和合成数据）
    pub fn at(global_position: Vector3) -> Self {
        RigidBodyPose {
            global_position: Some(global_position),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_type(mut self, type_tag: i64) -> Self {
        self.type_tag = Some(type_tag);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_role(mut self, role: PoseRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_global_rotation(mut self, rotation: Vector3) -> Self {
        self.global_rotation = Some(rotation);
        self
    }

    pub fn with_local_position(mut self, position: Vector3) -> Self {
        self.local_position = Some(position);
        self
    }

    pub fn with_local_rotation(mut self, rotation: Vector3) -> Self {
        self.local_rotation = Some(rotation);
        self
    }

    /// 航向角（全局旋转的 Y 分量，度）
    pub fn heading_deg(&self) -> Option<f64> {
        self.global_rotation.map(|r| r.y)
    }
}

impl fmt::Display for RigidBodyPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("<unnamed>");
        match self.global_position {
            Some(p) => write!(f, "{} @ {}", name, p),
            None => write!(f, "{} @ <unknown>", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_pose() {
        let json = r#"{
            "id": 7, "type": 2, "name": "Ball_Red",
            "global pos": [1.0, 0.2, -3.0], "global rot": [0.0, 90.0, 0.0],
            "local pos": [0.0, 0.0, 0.0], "local rot": [0.0, 0.0, 0.0],
            "velocity": [0.1, 0.0, 0.0], "rot velocity": [0.0, 0.0, 0.0]
        }"#;
        let pose: RigidBodyPose = serde_json::from_str(json).unwrap();

        assert_eq!(pose.id, Some(7));
        assert_eq!(pose.type_tag, Some(2));
        assert_eq!(pose.name.as_deref(), Some("Ball_Red"));
        assert_eq!(pose.global_position, Some(Vector3::new(1.0, 0.2, -3.0)));
        assert_eq!(pose.heading_deg(), Some(90.0));
        assert_eq!(pose.role, None);
    }

    #[test]
    fn test_missing_keys_stay_absent() {
        let pose: RigidBodyPose = serde_json::from_str(r#"{"name": "Body"}"#).unwrap();

        assert_eq!(pose.id, None);
        assert_eq!(pose.type_tag, None);
        assert_eq!(pose.global_position, None);
        assert_eq!(pose.velocity, None);
        assert_eq!(pose.angular_velocity, None);
    }

    #[test]
    fn test_display() {
        let pose = RigidBodyPose::at(Vector3::new(1.0, 0.0, 2.0)).with_name("Cone");
        assert_eq!(pose.to_string(), "Cone @ <1.000, 0.000, 2.000>");
        assert_eq!(RigidBodyPose::default().to_string(), "<unnamed> @ <unknown>");
    }
}
