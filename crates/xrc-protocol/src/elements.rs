//! 场地元素
//!
//! `GameElements.txt` 中的对象按类型划分为互不相交的分组，每组按 id 升序排列。

use crate::game::Alliance;
use crate::pose::RigidBodyPose;
use crate::robot::RobotProfile;
use crate::ProtocolError;
use std::collections::BTreeMap;
use std::fmt;

/// 场地元素类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    RedCargo,
    BlueCargo,
    Cone,
    Cube,
    Misc,
}

impl ElementKind {
    /// 按元素名称分类
    ///
    /// 没有类型编号或没有名称的对象一律归为 `Misc`。
    pub fn classify(profile: RobotProfile, element: &RigidBodyPose) -> ElementKind {
        let (Some(_), Some(name)) = (element.type_tag, element.name.as_deref()) else {
            return ElementKind::Misc;
        };
        match profile {
            RobotProfile::RapidReact if name.contains("Ball_Red") => ElementKind::RedCargo,
            RobotProfile::RapidReact if name.contains("Ball_Blue") => ElementKind::BlueCargo,
            RobotProfile::ChargedUp if name.contains("Cone") => ElementKind::Cone,
            RobotProfile::ChargedUp if name.contains("Cube") => ElementKind::Cube,
            _ => ElementKind::Misc,
        }
    }

    /// 属于某一联盟的得分元素
    pub fn owner(self) -> Option<Alliance> {
        match self {
            ElementKind::RedCargo => Some(Alliance::Red),
            ElementKind::BlueCargo => Some(Alliance::Blue),
            _ => None,
        }
    }

    /// 是否是可以被机器人收取的得分元素
    pub fn is_piece(self) -> bool {
        !matches!(self, ElementKind::Misc)
    }
}

/// 分类后的场地元素
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameElementState {
    groups: BTreeMap<ElementKind, Vec<RigidBodyPose>>,
}

impl GameElementState {
    /// 对元素分类、分组，并按 id 排序
    pub fn from_elements(
        profile: RobotProfile,
        elements: impl IntoIterator<Item = RigidBodyPose>,
    ) -> Self {
        let mut groups: BTreeMap<ElementKind, Vec<RigidBodyPose>> = BTreeMap::new();
        for element in elements {
            let kind = ElementKind::classify(profile, &element);
            groups.entry(kind).or_default().push(element);
        }
        for (kind, group) in groups.iter_mut() {
            if *kind != ElementKind::Misc {
                // None 排在最前，与 Option 的 Ord 一致
                group.sort_by_key(|e| e.id);
            }
        }
        GameElementState { groups }
    }

    /// 解析 `GameElements.txt`（`{"objects": [...]}`）
    pub fn parse(profile: RobotProfile, text: &str) -> Result<Self, ProtocolError> {
        #[derive(serde::Deserialize)]
        struct RawElements {
            objects: Vec<RigidBodyPose>,
        }

        let raw: RawElements = serde_json::from_str(text.trim())?;
        Ok(GameElementState::from_elements(profile, raw.objects))
    }

    /// 某一类型的元素（按 id 升序）
    pub fn group(&self, kind: ElementKind) -> &[RigidBodyPose] {
        self.groups.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 本联盟可收取的元素：本联盟颜色的 cargo + 所有中立元素（cone/cube）
    pub fn alliance_pieces(&self, alliance: Alliance) -> impl Iterator<Item = &RigidBodyPose> {
        self.groups
            .iter()
            .filter(move |(kind, _)| {
                kind.is_piece()
                    && match kind.owner() {
                        Some(owner) => owner == alliance,
                        None => true,
                    }
            })
            .flat_map(|(_, group)| group.iter())
    }

    /// 所有得分元素（不分联盟）
    pub fn all_pieces(&self) -> impl Iterator<Item = &RigidBodyPose> {
        self.groups
            .iter()
            .filter(|(kind, _)| kind.is_piece())
            .flat_map(|(_, group)| group.iter())
    }

    /// 元素总数
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for GameElementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (kind, group) in &self.groups {
            let items: Vec<String> = group.iter().map(ToString::to_string).collect();
            writeln!(f, "{:?}: [{}]", kind, items.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector3;

    fn element(id: i64, name: &str) -> RigidBodyPose {
        RigidBodyPose::at(Vector3::ZERO).with_id(id).with_type(1).with_name(name)
    }

    #[test]
    fn test_classify_and_sort() {
        let state = GameElementState::from_elements(
            RobotProfile::RapidReact,
            vec![
                element(5, "Ball_Red"),
                element(2, "Ball_Blue"),
                element(1, "Ball_Red(Clone)"),
                element(3, "Hub"),
                RigidBodyPose::at(Vector3::ZERO).with_name("Ball_Red"), // 无类型编号
            ],
        );

        let red: Vec<_> = state.group(ElementKind::RedCargo).iter().map(|e| e.id).collect();
        assert_eq!(red, vec![Some(1), Some(5)]);
        assert_eq!(state.group(ElementKind::BlueCargo).len(), 1);
        assert_eq!(state.group(ElementKind::Misc).len(), 2);
        assert_eq!(state.group(ElementKind::Cone).len(), 0);
        assert_eq!(state.len(), 5);
    }

    #[test]
    fn test_alliance_pieces() {
        let state = GameElementState::from_elements(
            RobotProfile::RapidReact,
            vec![element(1, "Ball_Red"), element(2, "Ball_Blue"), element(3, "Ball_Blue")],
        );
        assert_eq!(state.alliance_pieces(Alliance::Red).count(), 1);
        assert_eq!(state.alliance_pieces(Alliance::Blue).count(), 2);
        assert_eq!(state.alliance_pieces(Alliance::Neither).count(), 0);
        assert_eq!(state.all_pieces().count(), 3);
    }

    #[test]
    fn test_neutral_pieces_belong_to_everyone() {
        let state = GameElementState::from_elements(
            RobotProfile::ChargedUp,
            vec![element(1, "Cone"), element(2, "Cube"), element(3, "Ball_Red")],
        );
        assert_eq!(state.alliance_pieces(Alliance::Red).count(), 2);
        assert_eq!(state.alliance_pieces(Alliance::Neither).count(), 2);
        // Charged Up 没有 cargo，名字像 cargo 的对象归为杂项
        assert_eq!(state.group(ElementKind::Misc).len(), 1);
    }

    #[test]
    fn test_parse() {
        let text = r#"{"objects": [
            {"id": 4, "type": 1, "name": "Cube", "global pos": [0.0, 0.1, 1.0]},
            {"id": 2, "type": 1, "name": "Cone", "global pos": [0.0, 0.1, 2.0]}
        ]}"#;
        let state = GameElementState::parse(RobotProfile::ChargedUp, text).unwrap();
        assert_eq!(state.group(ElementKind::Cone)[0].id, Some(2));
        assert_eq!(state.group(ElementKind::Cube)[0].id, Some(4));
        assert!(GameElementState::parse(RobotProfile::ChargedUp, r#"{"objects": ["#).is_err());
    }
}
