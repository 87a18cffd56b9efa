use std::fmt::{Display, Formatter};

use crate::model::{Activity, RosterSnapshot};
use crate::view::{Banner, SignupForm};

#[derive(Debug, Clone, PartialEq)]
pub struct RosterView {
    pub list: ListView,
    pub selector: Vec<String>,
    pub form: SignupForm,
    pub banner: Banner,
}

/// The card list degrades to an inline error when the load failed; an absent
/// roster has no other meaningful rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    Loaded(Vec<ActivityCard>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub capacity: CapacityRatio,
    pub participants: ParticipantList,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityRatio {
    pub taken: usize,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParticipantList {
    Empty,
    Rows(Vec<ParticipantRow>),
}

/// Each row carries the exact (activity, email) pair bound at render time,
/// so one delegated handler can dispatch any row's withdrawal.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantRow {
    pub email: String,
    pub withdraw: WithdrawAction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithdrawAction {
    pub activity: String,
    pub email: String,
}

/// Pure function of the client state. The view tree is rebuilt from scratch
/// on every call; nothing from a previous render survives into the next one.
pub fn render(
    snapshot: &RosterSnapshot,
    load_error: Option<&str>,
    form: &SignupForm,
    banner: &Banner,
) -> RosterView {
    let list = match load_error {
        Some(message) => ListView::Failed(message.to_string()),
        None => ListView::Loaded(snapshot.iter().map(|(name, a)| card(name, a)).collect()),
    };
    RosterView {
        list,
        selector: snapshot.names().cloned().collect(),
        form: form.clone(),
        banner: banner.clone(),
    }
}

fn card(name: &str, activity: &Activity) -> ActivityCard {
    let participants = if activity.participants.is_empty() {
        ParticipantList::Empty
    } else {
        let rows = activity
            .participants
            .iter()
            .map(|email| ParticipantRow {
                email: email.clone(),
                withdraw: WithdrawAction {
                    activity: name.to_string(),
                    email: email.clone(),
                },
            })
            .collect();
        ParticipantList::Rows(rows)
    };
    ActivityCard {
        name: name.to_string(),
        description: activity.description.clone(),
        schedule: activity.schedule.clone(),
        capacity: CapacityRatio {
            taken: activity.participants.len(),
            max: activity.max_participants,
        },
        participants,
    }
}

impl Display for CapacityRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.taken, self.max)
    }
}

impl Display for ActivityCard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} ({})", self.name, self.capacity)?;
        writeln!(f, "  {}", self.description)?;
        writeln!(f, "  Schedule: {}", self.schedule)?;
        match &self.participants {
            ParticipantList::Empty => writeln!(f, "  No participants yet"),
            ParticipantList::Rows(rows) => {
                writeln!(f, "  Participants:")?;
                for row in rows {
                    writeln!(f, "    - {}", row.email)?;
                }
                Ok(())
            }
        }
    }
}

impl Display for RosterView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if !self.banner.is_hidden() {
            writeln!(f, "{}", self.banner)?;
        }
        match &self.list {
            ListView::Failed(message) => writeln!(f, "{message}")?,
            ListView::Loaded(cards) => {
                for card in cards {
                    write!(f, "{card}")?;
                }
            }
        }
        if !self.selector.is_empty() {
            writeln!(f, "Activities: {}", self.selector.join(", "))?;
        }
        Ok(())
    }
}
