/// Rank of a party in the three-party ring.
#[derive(std::cmp::Eq, std::cmp::PartialEq, Clone, Copy, Debug, Hash)]
pub enum PartyID {
    /// Party 0, the one that connects first
    ID0 = 0,
    /// Party 1
    ID1 = 1,
    /// Party 2
    ID2 = 2,
}

impl PartyID {
    pub const ALL: [PartyID; 3] = [PartyID::ID0, PartyID::ID1, PartyID::ID2];

    /// The ring successor.
    pub fn next_id(&self) -> Self {
        match *self {
            PartyID::ID0 => PartyID::ID1,
            PartyID::ID1 => PartyID::ID2,
            PartyID::ID2 => PartyID::ID0,
        }
    }

    /// The ring predecessor.
    pub fn prev_id(&self) -> Self {
        match *self {
            PartyID::ID0 => PartyID::ID2,
            PartyID::ID1 => PartyID::ID0,
            PartyID::ID2 => PartyID::ID1,
        }
    }
}

impl TryFrom<usize> for PartyID {
    type Error = crate::error::Error;

    fn try_from(other: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .get(other)
            .copied()
            .ok_or(Self::Error::IdError(other))
    }
}

impl From<PartyID> for usize {
    #[inline(always)]
    fn from(other: PartyID) -> Self {
        other as usize
    }
}

impl std::fmt::Display for PartyID {
    #[inline(always)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", *self as usize)
    }
}
