//! 机器人配置与机器人状态
//!
//! 每种机器人（[`RobotProfile`]）有一张"仿真器部件名 → 语义角色"的角色表。
//! 解析 `myRobot.txt` 时按名称**完全匹配**绑定角色，未匹配的部件作为普通部件保留。

use crate::game::Alliance;
use crate::pose::{PoseRole, RigidBodyPose};
use crate::vector::Vector3;
use crate::ProtocolError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 机器人配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RobotProfile {
    /// Rapid React 赛季（双侧进球 + 射球罩 + 爬升钩）
    RapidReact,
    /// Charged Up 赛季（升降 + 滑台机械臂）
    ChargedUp,
}

const RAPID_REACT_ROLES: &[(&str, PoseRole)] = &[
    ("Body", PoseRole::Body),
    ("Indicator", PoseRole::Hood),
    ("IntakeFlap1", PoseRole::LeftIntake),
    ("IntakeFlap2", PoseRole::RightIntake),
    ("arm1", PoseRole::ClimberArm1),
    ("arm2", PoseRole::ClimberArm2),
    ("Hook1", PoseRole::ClimberHook1),
    ("Hook2", PoseRole::ClimberHook2),
];

const CHARGED_UP_ROLES: &[(&str, PoseRole)] = &[
    ("Body", PoseRole::Body),
    ("NotUpdated", PoseRole::NotUpdated),
    ("Lift", PoseRole::Lift),
    ("Slide", PoseRole::Slide),
    ("Slide2", PoseRole::Slide2),
    ("Intake1", PoseRole::Intake1),
    ("Intake2", PoseRole::Intake2),
    ("Intake3", PoseRole::Intake3),
    ("Intake4", PoseRole::Intake4),
    ("LiftBuddy", PoseRole::LiftBuddy),
    ("BuddyHinge", PoseRole::BuddyHinge),
];

impl RobotProfile {
    /// 仿真器部件名与语义角色的对应表
    pub fn role_table(self) -> &'static [(&'static str, PoseRole)] {
        match self {
            RobotProfile::RapidReact => RAPID_REACT_ROLES,
            RobotProfile::ChargedUp => CHARGED_UP_ROLES,
        }
    }

    /// 自动化命令依赖的部件；缺失任何一个都视为快照不完整
    pub fn required_roles(self) -> &'static [PoseRole] {
        match self {
            RobotProfile::RapidReact => &[
                PoseRole::Body,
                PoseRole::Hood,
                PoseRole::LeftIntake,
                PoseRole::RightIntake,
                PoseRole::ClimberHook1,
            ],
            RobotProfile::ChargedUp => &[PoseRole::Body, PoseRole::Lift, PoseRole::Slide],
        }
    }

    /// 按名称完全匹配查找角色
    pub fn bind_role(self, name: &str) -> Option<PoseRole> {
        self.role_table()
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, role)| *role)
    }

    /// 机器人文件中是否携带联盟信息
    pub fn reports_alliance(self) -> bool {
        matches!(self, RobotProfile::ChargedUp)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RobotProfile::RapidReact => "rapid-react",
            RobotProfile::ChargedUp => "charged-up",
        }
    }
}

impl FromStr for RobotProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "rapid-react" | "rr" => Ok(RobotProfile::RapidReact),
            "charged-up" | "cu" => Ok(RobotProfile::ChargedUp),
            other => Err(format!("unknown robot profile: {}", other)),
        }
    }
}

impl fmt::Display for RobotProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 机器人状态（部件位姿树）
#[derive(Debug, Clone, PartialEq)]
pub struct RobotState {
    profile: RobotProfile,
    poses: Vec<RigidBodyPose>,
}

impl RobotState {
    /// 从已解析的位姿构造，绑定角色并校验必需部件
    ///
    /// 已带角色的位姿保持原角色；没有角色的位姿按名称查角色表。
    pub fn from_poses(
        profile: RobotProfile,
        poses: Vec<RigidBodyPose>,
    ) -> Result<Self, ProtocolError> {
        let poses: Vec<RigidBodyPose> = poses
            .into_iter()
            .map(|mut pose| {
                if pose.role.is_none() {
                    pose.role = pose.name.as_deref().and_then(|n| profile.bind_role(n));
                }
                pose
            })
            .collect();

        let state = RobotState { profile, poses };
        for &role in profile.required_roles() {
            let present = state.pose(role).is_some_and(|p| p.global_position.is_some());
            if !present {
                return Err(ProtocolError::MissingRole { profile, role });
            }
        }
        Ok(state)
    }

    /// 解析 `myRobot.txt`
    ///
    /// 返回机器人状态以及（若存在）机器人信息条目中的联盟。
    /// 联盟条目是带 `alliance` 键的对象，例如 `{"alliance": "RED"}`。
    pub fn parse(
        profile: RobotProfile,
        text: &str,
    ) -> Result<(Self, Option<Alliance>), ProtocolError> {
        let raw: serde_json::Value = serde_json::from_str(text.trim())?;
        let entries = raw
            .get("myrobot")
            .and_then(|v| v.as_array())
            .ok_or(ProtocolError::MissingKey { key: "myrobot", context: "robot file" })?;

        let mut alliance = None;
        let mut poses = Vec::with_capacity(entries.len());
        for entry in entries {
            if let Some(value) = entry.get("alliance") {
                let text = value.as_str().unwrap_or_default();
                alliance = Some(text.parse::<Alliance>()?);
                continue;
            }
            poses.push(serde_json::from_value::<RigidBodyPose>(entry.clone())?);
        }

        if profile.reports_alliance() && alliance.is_none() {
            return Err(ProtocolError::MissingRobotInfo);
        }

        Ok((RobotState::from_poses(profile, poses)?, alliance))
    }

    pub fn profile(&self) -> RobotProfile {
        self.profile
    }

    /// 按角色查找部件（同一角色出现多次时取第一个）
    pub fn pose(&self, role: PoseRole) -> Option<&RigidBodyPose> {
        self.poses.iter().find(|p| p.role == Some(role))
    }

    /// 车体
    pub fn body(&self) -> Option<&RigidBodyPose> {
        self.pose(PoseRole::Body)
    }

    /// 车体全局位置
    pub fn body_position(&self) -> Option<Vector3> {
        self.body().and_then(|b| b.global_position)
    }

    /// 车体航向（度）
    pub fn heading_deg(&self) -> Option<f64> {
        self.body().and_then(|b| b.heading_deg())
    }

    /// 未绑定角色的部件
    pub fn parts(&self) -> impl Iterator<Item = &RigidBodyPose> {
        self.poses.iter().filter(|p| p.role.is_none())
    }

    pub fn poses(&self) -> &[RigidBodyPose] {
        &self.poses
    }
}

impl fmt::Display for RobotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.body_position() {
            Some(p) => write!(f, "Robot @ {}", p),
            None => write!(f, "Robot @ <unknown>"),
        }
    }
}
