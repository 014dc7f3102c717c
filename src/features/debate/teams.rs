//! # Debate Setup
//!
//! Topic, stances, and the two team rosters under construction before a
//! debate is submitted. The rosters are kept disjoint and non-empty through
//! every mutation.

use crate::api::DebateStartRequest;
use crate::features::personas::PersonaKey;

/// A ready-made topic with matching stances
#[derive(Debug, Clone, Copy)]
pub struct TopicPreset {
    pub topic: &'static str,
    pub pro_stance: &'static str,
    pub con_stance: &'static str,
}

/// Preset topics offered before a debate is configured
pub const PRESET_TOPICS: [TopicPreset; 3] = [
    TopicPreset {
        topic: "乐队对我们来说意味着什么？",
        pro_stance: "乐队是我们表达自我、寻找归属的地方",
        con_stance: "乐队让我们学会了面对困难和成长",
    },
    TopicPreset {
        topic: "迷茫的时候应该怎么办？",
        pro_stance: "迷茫时应该停下来倾听内心的声音",
        con_stance: "迷茫时应该继续前进，在行动中找到方向",
    },
    TopicPreset {
        topic: "友情和梦想哪个更重要？",
        pro_stance: "友情是支撑我们追逐梦想的力量",
        con_stance: "梦想是让友情更有意义的目标",
    },
];

/// Which side of the debate a roster belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Pro,
    Con,
}

/// Debate configuration under construction.
///
/// Invariants, held after every mutation: the two rosters are disjoint, and
/// each keeps at least one member.
#[derive(Debug, Clone)]
pub struct DebateSetup {
    pub topic: String,
    pub pro_stance: String,
    pub con_stance: String,
    pro: Vec<PersonaKey>,
    con: Vec<PersonaKey>,
}

impl Default for DebateSetup {
    fn default() -> Self {
        Self::from_preset(&PRESET_TOPICS[0])
    }
}

impl DebateSetup {
    /// Start from a preset topic with the default team split
    pub fn from_preset(preset: &TopicPreset) -> Self {
        DebateSetup {
            topic: preset.topic.to_string(),
            pro_stance: preset.pro_stance.to_string(),
            con_stance: preset.con_stance.to_string(),
            pro: vec![PersonaKey::Tomori, PersonaKey::Anon],
            con: vec![PersonaKey::Taki, PersonaKey::Soyo],
        }
    }

    pub fn pro(&self) -> &[PersonaKey] {
        &self.pro
    }

    pub fn con(&self) -> &[PersonaKey] {
        &self.con
    }

    /// Toggle a persona's membership on the named team.
    ///
    /// Removing: rejected (returns false) if the persona is the team's last
    /// member. Adding: the persona joins the named team and leaves the
    /// opposing team in the same mutation, so the rosters never overlap and
    /// the persona is never on neither team transiently.
    pub fn toggle_member(&mut self, team: Team, member: PersonaKey) -> bool {
        let (target, other) = match team {
            Team::Pro => (&mut self.pro, &mut self.con),
            Team::Con => (&mut self.con, &mut self.pro),
        };

        if target.contains(&member) {
            if target.len() == 1 {
                return false;
            }
            target.retain(|m| *m != member);
        } else {
            target.push(member);
            other.retain(|m| *m != member);
        }
        true
    }

    /// Build the submission request for asynchronous execution
    pub fn to_request(&self) -> DebateStartRequest {
        DebateStartRequest {
            topic: self.topic.clone(),
            pro_stance: self.pro_stance.clone(),
            con_stance: self.con_stance.clone(),
            pro_philosophers: self.pro.clone(),
            con_philosophers: self.con.clone(),
            forced_stances: None,
            async_mode: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disjoint(setup: &DebateSetup) -> bool {
        !setup.pro().iter().any(|m| setup.con().contains(m))
    }

    #[test]
    fn test_default_teams() {
        let setup = DebateSetup::default();
        assert_eq!(setup.pro(), &[PersonaKey::Tomori, PersonaKey::Anon]);
        assert_eq!(setup.con(), &[PersonaKey::Taki, PersonaKey::Soyo]);
        assert_eq!(setup.topic, PRESET_TOPICS[0].topic);
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut setup = DebateSetup::default();

        // Rana is on neither team; adding puts her on pro only
        assert!(setup.toggle_member(Team::Pro, PersonaKey::Rana));
        assert!(setup.pro().contains(&PersonaKey::Rana));
        assert!(disjoint(&setup));

        // Toggling again removes her
        assert!(setup.toggle_member(Team::Pro, PersonaKey::Rana));
        assert!(!setup.pro().contains(&PersonaKey::Rana));
    }

    #[test]
    fn test_toggle_moves_between_teams() {
        let mut setup = DebateSetup::default();

        // Taki is on con; adding to pro must remove from con in one step
        assert!(setup.toggle_member(Team::Pro, PersonaKey::Taki));
        assert!(setup.pro().contains(&PersonaKey::Taki));
        assert!(!setup.con().contains(&PersonaKey::Taki));
        assert!(disjoint(&setup));
    }

    #[test]
    fn test_removing_last_member_rejected() {
        let mut setup = DebateSetup::default();

        // Shrink con to just taki
        assert!(setup.toggle_member(Team::Con, PersonaKey::Soyo));
        assert_eq!(setup.con(), &[PersonaKey::Taki]);

        // Removing the last con member is rejected, state unchanged
        let before = setup.clone();
        assert!(!setup.toggle_member(Team::Con, PersonaKey::Taki));
        assert_eq!(setup.con(), before.con());
        assert_eq!(setup.pro(), before.pro());
    }

    #[test]
    fn test_invariants_hold_across_sequences() {
        let mut setup = DebateSetup::default();
        let moves = [
            (Team::Pro, PersonaKey::Rana),
            (Team::Con, PersonaKey::Rana),
            (Team::Con, PersonaKey::Tomori),
            (Team::Pro, PersonaKey::Soyo),
            (Team::Pro, PersonaKey::Anon),
            (Team::Con, PersonaKey::Anon),
            (Team::Pro, PersonaKey::Taki),
        ];

        for (team, member) in moves {
            setup.toggle_member(team, member);
            assert!(disjoint(&setup), "rosters overlap after toggling {member}");
            assert!(!setup.pro().is_empty(), "pro emptied by toggling {member}");
            assert!(!setup.con().is_empty(), "con emptied by toggling {member}");
        }
    }

    #[test]
    fn test_to_request_shape() {
        let setup = DebateSetup::default();
        let request = setup.to_request();

        assert!(request.async_mode);
        assert_eq!(request.topic, setup.topic);
        assert_eq!(request.pro_philosophers, setup.pro());
        assert_eq!(request.con_philosophers, setup.con());
        assert!(request.forced_stances.is_none());
    }
}
