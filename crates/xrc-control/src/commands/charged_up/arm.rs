//! 机械臂（升降 + 滑台）
//!
//! # 模式
//!
//! 四组模式互相独立，都只在按钮上升沿切换：
//!
//! | 按钮 | 模式 | 取值 |
//! |------|------|------|
//! | `dpad_up` | 放置层级 | Low → High → Mid → Low ... |
//! | `dpad_down` | 元素类型 | Cone ↔ Cube |
//! | `dpad_left` | 取件站 | DoubleStation ↔ SingleStation |
//! | `bumper_right` | 地面取件 | Off ↔ On |
//!
//! # 目标选择
//!
//! 地面取件 → 装载区（取件站）→ 社区（层级 × 元素类型）→ 收起。

use super::controls::ChargedUpControls;
use crate::actuator;
use crate::cache::GeometryCache;
use crate::mode::{CyclicMode, ModeCycler};
use crate::pipeline::Command;
use crate::rate_limited::{ControllerSettings, RateLimitedController};
use crate::region::{self, AllianceRegion};
use xrc_protocol::{Alliance, PoseRole, Vector3};

/// 滑台 bang-bang 死区（米）
pub const SLIDER_DEADBAND: f64 = 0.01;

/// 放置层级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceTier {
    High,
    Mid,
    Low,
}

impl CyclicMode for PlaceTier {
    const ALL: &'static [Self] = &[PlaceTier::High, PlaceTier::Mid, PlaceTier::Low];

    fn name(self) -> &'static str {
        match self {
            PlaceTier::High => "HIGH",
            PlaceTier::Mid => "MID",
            PlaceTier::Low => "LOW",
        }
    }
}

/// 元素类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePiece {
    Cone,
    Cube,
}

impl CyclicMode for GamePiece {
    const ALL: &'static [Self] = &[GamePiece::Cone, GamePiece::Cube];

    fn name(self) -> &'static str {
        match self {
            GamePiece::Cone => "CONE",
            GamePiece::Cube => "CUBE",
        }
    }
}

/// 取件站
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupSource {
    DoubleStation,
    SingleStation,
}

impl CyclicMode for PickupSource {
    const ALL: &'static [Self] = &[PickupSource::DoubleStation, PickupSource::SingleStation];

    fn name(self) -> &'static str {
        match self {
            PickupSource::DoubleStation => "DOUBLE_STATION",
            PickupSource::SingleStation => "SINGLE_STATION",
        }
    }
}

/// 地面取件覆盖
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundOverride {
    Off,
    On,
}

impl CyclicMode for GroundOverride {
    const ALL: &'static [Self] = &[GroundOverride::Off, GroundOverride::On];

    fn name(self) -> &'static str {
        match self {
            GroundOverride::Off => "GROUND_OFF",
            GroundOverride::On => "GROUND_ON",
        }
    }
}

/// 机械臂目标：升降高度 + 滑台伸出量（米）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmSetpoint {
    pub elevation: f64,
    pub extension: f64,
}

impl ArmSetpoint {
    pub const fn new(elevation: f64, extension: f64) -> Self {
        ArmSetpoint { elevation, extension }
    }
}

/// 机械臂所处情形（决定目标）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmSituation {
    Ground,
    Pickup(PickupSource),
    Place(PlaceTier, GamePiece),
    Stow,
}

impl ArmSituation {
    /// 目标查表
    pub fn setpoint(self) -> ArmSetpoint {
        use GamePiece::{Cone, Cube};
        use PlaceTier::{High, Low, Mid};

        match self {
            ArmSituation::Ground => ArmSetpoint::new(0.000, 0.332),
            ArmSituation::Pickup(PickupSource::DoubleStation) => ArmSetpoint::new(0.858, 0.343),
            ArmSituation::Pickup(PickupSource::SingleStation) => ArmSetpoint::new(0.412, 0.287),
            ArmSituation::Place(High, Cone) => ArmSetpoint::new(0.978, 0.424),
            ArmSituation::Place(Mid, Cone) => ArmSetpoint::new(0.811, 0.378),
            ArmSituation::Place(High, Cube) => ArmSetpoint::new(0.905, 0.400),
            ArmSituation::Place(Mid, Cube) => ArmSetpoint::new(0.640, 0.355),
            ArmSituation::Place(Low, _) => ArmSetpoint::new(0.140, 0.332),
            ArmSituation::Stow => ArmSetpoint::new(0.130, 0.287),
        }
    }
}

/// 机械臂命令
#[derive(Debug)]
pub struct ArmCommand {
    tier: ModeCycler<PlaceTier>,
    piece: ModeCycler<GamePiece>,
    source: ModeCycler<PickupSource>,
    ground: ModeCycler<GroundOverride>,
    elevator: RateLimitedController,
    loading_zone: AllianceRegion,
    community: AllianceRegion,
    situation: Option<ArmSituation>,
}

impl ArmCommand {
    pub fn new(settings: &ControllerSettings) -> Self {
        ArmCommand {
            tier: ModeCycler::new("place tier", PlaceTier::Low),
            piece: ModeCycler::new("game piece", GamePiece::Cone),
            source: ModeCycler::new("pickup source", PickupSource::DoubleStation),
            ground: ModeCycler::new("ground override", GroundOverride::Off),
            elevator: RateLimitedController::pid(-5.0, 0.0, 0.0, 1.0, settings),
            loading_zone: region::charged_up_loading_zone(),
            community: region::charged_up_community(),
            situation: None,
        }
    }

    pub fn tier(&self) -> PlaceTier {
        self.tier.mode()
    }

    pub fn piece(&self) -> GamePiece {
        self.piece.mode()
    }

    pub fn source(&self) -> PickupSource {
        self.source.mode()
    }

    pub fn ground(&self) -> GroundOverride {
        self.ground.mode()
    }

    /// 上一个 tick 选出的情形
    pub fn situation(&self) -> Option<ArmSituation> {
        self.situation
    }

    /// 按当前模式与车体位置选择情形
    pub fn classify(&self, alliance: Alliance, body: Vector3) -> ArmSituation {
        if self.ground.mode() == GroundOverride::On {
            ArmSituation::Ground
        } else if self.loading_zone.contains(alliance, body) {
            ArmSituation::Pickup(self.source.mode())
        } else if self.community.contains(alliance, body) {
            ArmSituation::Place(self.tier.mode(), self.piece.mode())
        } else {
            ArmSituation::Stow
        }
    }
}

impl Command<ChargedUpControls> for ArmCommand {
    fn name(&self) -> &'static str {
        "arm"
    }

    fn execute(&mut self, cache: &GeometryCache<'_>, controls: &mut ChargedUpControls) {
        let snapshot = cache.snapshot();
        let gamepad = snapshot.gamepad();
        self.tier.update(gamepad.dpad_up);
        self.piece.update(gamepad.dpad_down);
        self.source.update(gamepad.dpad_left);
        self.ground.update(gamepad.bumper_right);

        // 预设按钮由本命令接管
        controls.high_arm = false;
        controls.mid_arm = false;
        controls.stow_arm = false;
        controls.station_arm = false;

        let robot = snapshot.robot();
        let Some(body) = robot.body_position() else {
            return;
        };
        let situation = self.classify(snapshot.alliance(), body);
        if self.situation != Some(situation) {
            tracing::debug!(?situation, "Arm target changed");
            self.situation = Some(situation);
        }
        let target = situation.setpoint();

        let Some(height) = robot.pose(PoseRole::Lift).and_then(|p| p.local_position).map(|p| p.y)
        else {
            return;
        };

        if !actuator::manual_override(controls.elevator_up, controls.elevator_down) {
            match self.elevator.step_at(target.elevation - height, cache.now()) {
                Ok(output) => actuator::apply_split(
                    &mut controls.elevator_up,
                    &mut controls.elevator_down,
                    output,
                ),
                Err(e) => tracing::warn!("Elevator controller rejected input: {}", e),
            }
        }

        if !controls.slide_out
            && !controls.slide_in
            && let Some(slide) = robot.pose(PoseRole::Slide).and_then(|p| p.local_position)
        {
            actuator::apply_bang_bang(
                &mut controls.slide_out,
                &mut controls.slide_in,
                target.extension - (slide.y - height),
                SLIDER_DEADBAND,
            );
        }
    }
}
