use rand::Rng;

/// Alphabet room codes are drawn from
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default room code length
pub const CODE_LENGTH: usize = 5;

/// Trait for generating candidate room codes.
///
/// Uniqueness is enforced by the registry, which keeps asking for candidates
/// until one is unused.
pub trait RoomCodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform random codes over `A-Z0-9`. Not cryptographically secure.
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    pub fn new() -> Self {
        Self::with_length(CODE_LENGTH)
    }

    pub fn with_length(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomCodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::rng();
        (0..self.length)
            .map(|_| char::from(CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())]))
            .collect()
    }
}
