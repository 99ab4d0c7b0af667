use num_bigint::BigInt;

/// Identity used to key a `Hash` value. Only `Integer`, `Boolean`, and
/// `String` are hashable; two values with equal `HashKey` are equal keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    type_tag: u8,
    hash: u64,
}

const TAG_INTEGER: u8 = 0;
const TAG_BOOLEAN: u8 = 1;
const TAG_STRING: u8 = 2;

impl HashKey {
    pub fn for_integer(value: &BigInt) -> Self {
        let (sign, bytes) = value.to_bytes_be();
        let sign_byte: u8 = match sign {
            num_bigint::Sign::Minus => 0,
            _ => 1,
        };
        let mut buf = bytes;
        buf.push(sign_byte);
        Self {
            type_tag: TAG_INTEGER,
            hash: fnv1a(&buf),
        }
    }

    pub fn for_boolean(value: bool) -> Self {
        Self {
            type_tag: TAG_BOOLEAN,
            hash: if value { 1 } else { 0 },
        }
    }

    pub fn for_string(value: &str) -> Self {
        Self {
            type_tag: TAG_STRING,
            hash: fnv1a(value.as_bytes()),
        }
    }
}

/// 64-bit FNV-1a over raw bytes.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;
    let mut hash = OFFSET_BASIS;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_with_same_value_hash_equal() {
        let a = HashKey::for_integer(&BigInt::from(42));
        let b = HashKey::for_integer(&BigInt::from(42));
        assert_eq!(a, b);
    }

    #[test]
    fn positive_and_negative_integers_differ() {
        let a = HashKey::for_integer(&BigInt::from(5));
        let b = HashKey::for_integer(&BigInt::from(-5));
        assert_ne!(a, b);
    }

    #[test]
    fn strings_with_same_bytes_hash_equal() {
        assert_eq!(HashKey::for_string("hi"), HashKey::for_string("hi"));
        assert_ne!(HashKey::for_string("hi"), HashKey::for_string("bye"));
    }

    #[test]
    fn booleans_map_to_zero_and_one() {
        assert_ne!(HashKey::for_boolean(true), HashKey::for_boolean(false));
    }
}
