//! # Tick 日志
//!
//! 每个成功的 tick 追加一行 CSV：时间、比赛阶段、剩余时间、车体位姿，
//! 以及完整的控制输出。文件已存在且非空时只追加数据行，不重复写表头。

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use xrc_protocol::{ControlOutput, WorldSnapshot};

/// Tick 日志错误
#[derive(Error, Debug)]
pub enum TickLogError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// CSV 表头
pub const HEADER: [&str; 26] = [
    "elapsed_s",
    "phase",
    "time_left",
    "body_x",
    "body_y",
    "body_z",
    "heading",
    "a",
    "b",
    "x",
    "y",
    "dpad_down",
    "dpad_up",
    "dpad_left",
    "dpad_right",
    "bumper_l",
    "bumper_r",
    "stop",
    "restart",
    "right_y",
    "right_x",
    "left_y",
    "left_x",
    "trigger_l",
    "trigger_r",
    "precision",
];

/// Tick 日志
#[derive(Debug)]
pub struct TickLog {
    path: PathBuf,
    writer: csv::Writer<File>,
    started: Instant,
    rows: u64,
}

impl TickLog {
    /// 打开（或创建）日志文件
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TickLogError> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| TickLogError::Io { path: path.to_path_buf(), source };

        let has_content = fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false);
        let file = OpenOptions::new().create(true).append(true).open(path).map_err(io_err)?;

        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        if !has_content {
            writer.write_record(HEADER)?;
            writer.flush().map_err(io_err)?;
        }
        tracing::info!("Logging ticks to {}", path.display());

        Ok(TickLog { path: path.to_path_buf(), writer, started: Instant::now(), rows: 0 })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 本次打开后写入的行数
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// 追加一行
    pub fn record(
        &mut self,
        snapshot: &WorldSnapshot,
        output: &ControlOutput,
    ) -> Result<(), TickLogError> {
        let optional = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        let flag = |v: bool| if v { "1" } else { "0" }.to_string();

        let robot = snapshot.robot();
        let body = robot.body_position();
        let row = [
            self.started.elapsed().as_secs_f64().to_string(),
            snapshot.game().phase.as_str().to_string(),
            snapshot.game().time_left.to_string(),
            optional(body.map(|p| p.x)),
            optional(body.map(|p| p.y)),
            optional(body.map(|p| p.z)),
            optional(robot.heading_deg()),
            flag(output.a),
            flag(output.b),
            flag(output.x),
            flag(output.y),
            flag(output.dpad_down),
            flag(output.dpad_up),
            flag(output.dpad_left),
            flag(output.dpad_right),
            flag(output.bumper_l),
            flag(output.bumper_r),
            flag(output.stop),
            flag(output.restart),
            output.right_y.to_string(),
            output.right_x.to_string(),
            output.left_y.to_string(),
            output.left_x.to_string(),
            output.trigger_l.to_string(),
            output.trigger_r.to_string(),
            output.precision.to_string(),
        ];
        self.writer.write_record(&row)?;
        self.rows += 1;
        Ok(())
    }

    /// 刷新到磁盘
    pub fn flush(&mut self) -> Result<(), TickLogError> {
        self.writer
            .flush()
            .map_err(|source| TickLogError::Io { path: self.path.clone(), source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xrc_protocol::{
        Alliance, GameElementState, GamePhase, GameState, GamepadState, RigidBodyPose,
        RobotProfile, RobotState, Vector3,
    };

    fn snapshot() -> WorldSnapshot {
        let part = |name: &str| RigidBodyPose::at(Vector3::new(1.0, 0.1, -2.0)).with_name(name);
        let robot = RobotState::from_poses(
            RobotProfile::ChargedUp,
            vec![
                part("Body").with_global_rotation(Vector3::new(0.0, 30.0, 0.0)),
                part("Lift"),
                part("Slide"),
            ],
        )
        .unwrap();
        WorldSnapshot::new(
            robot,
            GameElementState::from_elements(RobotProfile::ChargedUp, Vec::new()),
            GameState { phase: GamePhase::Endgame, time_left: 12.5 },
            GamepadState::default(),
            Alliance::Blue,
        )
    }

    fn read_rows(path: &Path) -> Vec<csv::StringRecord> {
        let mut reader = csv::ReaderBuilder::new().has_headers(false).from_path(path).unwrap();
        reader.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn test_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ticks.csv");
        let output = ControlOutput { y: true, trigger_r: 0.75, ..Default::default() };

        {
            let mut log = TickLog::open(&path).unwrap();
            log.record(&snapshot(), &output).unwrap();
            assert_eq!(log.rows(), 1);
        }
        {
            let mut log = TickLog::open(&path).unwrap();
            log.record(&snapshot(), &ControlOutput::default()).unwrap();
            log.flush().unwrap();
        }

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "elapsed_s");
        assert_eq!(rows[0].len(), HEADER.len());

        let first = &rows[1];
        assert_eq!(first.len(), HEADER.len());
        assert_eq!(&first[1], "ENDGAME");
        assert_eq!(&first[2], "12.5");
        assert_eq!(&first[6], "30");
        assert_eq!(&first[10], "1"); // y
        assert_eq!(&first[24], "0.75"); // trigger_r
    }
}
