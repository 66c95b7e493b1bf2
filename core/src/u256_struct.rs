/// Defines a 256 bit wrapper type around a byte array
macro_rules! u256_struct {
    ($name:ident) => {
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name([u8; 32]);

        impl $name {
            pub fn zero() -> Self {
                Self([0; 32])
            }

            pub const fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            pub fn is_zero(&self) -> bool {
                self.0 == [0; 32]
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            pub fn random() -> Self {
                use rand::Rng;
                Self(rand::thread_rng().gen())
            }

            pub fn encode_hex(&self) -> String {
                use std::fmt::Write;
                let mut result = String::with_capacity(64);
                for byte in self.0 {
                    write!(&mut result, "{:02X}", byte).unwrap();
                }
                result
            }

            pub fn decode_hex(s: impl AsRef<str>) -> anyhow::Result<Self> {
                let s = s.as_ref();
                if s.is_empty() || s.len() > 64 {
                    anyhow::bail!("invalid length of hex string");
                }
                let mut padded = String::new();
                let s = if s.len() < 64 {
                    for _ in s.len()..64 {
                        padded.push('0');
                    }
                    padded.push_str(s);
                    padded.as_str()
                } else {
                    s
                };
                let mut bytes = [0u8; 32];
                for (i, byte) in bytes.iter_mut().enumerate() {
                    *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)?;
                }
                Ok(Self(bytes))
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                let mut bytes = [0u8; 32];
                bytes[24..].copy_from_slice(&value.to_be_bytes());
                Self(bytes)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.encode_hex())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.encode_hex())
            }
        }
    };
}
