//! Direct messages between users.

use rand::Rng;
use time::OffsetDateTime;
use uuid::Uuid;

use super::sampling;
use crate::error::SeedError;
use crate::roster::Roster;

/// Generated message data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedMessage {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub body: String,
    pub sent_at: OffsetDateTime,
}

/// Configuration for message generation.
#[derive(Debug, Clone)]
pub struct MessageGenConfig {
    pub body_max_chars: usize,
    /// How far back `sent_at` may reach.
    pub history_days: i64,
}

impl Default for MessageGenConfig {
    fn default() -> Self {
        Self {
            body_max_chars: 200,
            history_days: 365,
        }
    }
}

pub struct MessageGenerator {
    config: MessageGenConfig,
}

impl MessageGenerator {
    pub fn new() -> Self {
        Self {
            config: MessageGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: MessageGenConfig) -> Result<Self, SeedError> {
        if config.body_max_chars == 0 {
            return Err(SeedError::InvalidConfig(
                "body_max_chars must be at least 1".into(),
            ));
        }
        sampling::check_history_days("history_days", config.history_days)?;
        Ok(Self { config })
    }

    pub fn generate(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> GeneratedMessage {
        GeneratedMessage {
            id: Uuid::new_v4(),
            sender_id,
            recipient_id,
            body: sampling::text(self.config.body_max_chars, rng),
            sent_at: sampling::datetime_within_days(now, self.config.history_days, rng),
        }
    }

    /// Generates `count` messages, each between two distinct users of any role.
    ///
    /// Fails when `count > 0` and the roster holds fewer than two users.
    pub fn generate_batch(
        &self,
        count: usize,
        roster: &Roster,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedMessage>, SeedError> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let users = roster.ids();
        if users.len() < 2 {
            return Err(SeedError::NotEnoughUsers { found: users.len() });
        }

        Ok((0..count)
            .map(|_| {
                let sender = rng.gen_range(0..users.len());
                // Draw from the other n-1 users, skipping over the sender's slot
                let mut recipient = rng.gen_range(0..users.len() - 1);
                if recipient >= sender {
                    recipient += 1;
                }
                self.generate(users[sender], users[recipient], now, rng)
            })
            .collect())
    }
}

impl Default for MessageGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::RosterEntry;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use stays::Role;
    use std::collections::HashSet;

    fn roster(n: usize) -> Roster {
        Roster::new(
            (0..n)
                .map(|i| RosterEntry {
                    id: Uuid::new_v4(),
                    role: Role::ALL[i % Role::ALL.len()],
                })
                .collect(),
        )
    }

    #[test]
    fn test_sender_differs_from_recipient() {
        let mut rng = StdRng::seed_from_u64(60);
        let now = OffsetDateTime::now_utc();
        let roster = roster(2);

        let messages = MessageGenerator::new()
            .generate_batch(100, &roster, now, &mut rng)
            .unwrap();

        assert_eq!(messages.len(), 100);
        for m in &messages {
            assert_ne!(m.sender_id, m.recipient_id);
            assert!(m.body.chars().count() <= 200);
            assert!(m.sent_at <= now);
        }
    }

    #[test]
    fn test_every_user_can_receive() {
        let mut rng = StdRng::seed_from_u64(61);
        let roster = roster(5);

        let messages = MessageGenerator::new()
            .generate_batch(300, &roster, OffsetDateTime::now_utc(), &mut rng)
            .unwrap();

        let recipients: HashSet<_> = messages.iter().map(|m| m.recipient_id).collect();
        assert_eq!(recipients.len(), 5);
    }

    #[test]
    fn test_invalid_config() {
        let empty = MessageGenerator::with_config(MessageGenConfig {
            body_max_chars: 0,
            ..Default::default()
        });
        assert!(matches!(empty, Err(SeedError::InvalidConfig(_))));

        let future = MessageGenerator::with_config(MessageGenConfig {
            history_days: -1,
            ..Default::default()
        });
        assert!(future.is_err());
    }

    #[test]
    fn test_single_user_fails() {
        let mut rng = StdRng::seed_from_u64(62);
        let result = MessageGenerator::new().generate_batch(
            1,
            &roster(1),
            OffsetDateTime::now_utc(),
            &mut rng,
        );
        assert!(matches!(result, Err(SeedError::NotEnoughUsers { found: 1 })));

        let none = MessageGenerator::new()
            .generate_batch(0, &roster(1), OffsetDateTime::now_utc(), &mut rng)
            .unwrap();
        assert!(none.is_empty());
    }
}
