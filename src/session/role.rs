/// Dashboard tier of the signed-in user, from the session's `roleId`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    /// Platform master: sees every section.
    Master,
    /// Client administrator: limited to its own client's data.
    Client,
}

impl Role {
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Master),
            2 => Some(Self::Client),
            _ => None,
        }
    }

    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Master => 1,
            Self::Client => 2,
        }
    }

    #[must_use]
    pub const fn is_master(self) -> bool {
        matches!(self, Self::Master)
    }
}

#[cfg(test)]
mod tests {
    use super::Role;

    #[test]
    fn role_ids_map_both_ways() {
        for role in [Role::Master, Role::Client] {
            assert_eq!(Role::from_id(role.id()), Some(role));
        }
        assert_eq!(Role::from_id(0), None);
        assert_eq!(Role::from_id(9), None);
    }

    #[test]
    fn only_master_is_master() {
        assert!(Role::Master.is_master());
        assert!(!Role::Client.is_master());
    }
}
