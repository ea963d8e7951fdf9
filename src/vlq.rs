//! Variable-length quantity encoding for position components.
//! Each byte carries seven bits of the value, most significant
//! group first; every byte but the last has its high bit set.

use Error;
use num_traits::NumCast;
use width::FixedWidth;

pub fn encode_u64(mut value: u64) -> Vec<u8> {
    if value == 0 {
        return vec![0]
    }

    let mut vec = Vec::with_capacity(4);
    while value > 0 {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;

        if !vec.is_empty() {
            byte |= 0x80;
        }

        vec.push(byte);
    }

    vec.reverse();
    vec
}

pub fn encode<T: FixedWidth>(value: T) -> Vec<u8> {
    encode_u64(value.into())
}

pub fn decode_u64(bytes: &[u8]) -> Result<(u64, &[u8]), Error> {
    let mut value: u64 = 0;
    for (i, byte) in bytes.iter().enumerate() {
        if value > u64::max_value() >> 7 {
            return Err(Error::VLQOverflow)
        }

        let decoded_byte = byte & 0x7F;
        value = (value << 7) + <u64 as From<u8>>::from(decoded_byte);

        if byte < &0x80 {
            return Ok((value, &bytes[i+1..]));
        }
    }
    Err(Error::VLQNoTerminatingByte)
}

/// Decodes one value and narrows it to `T`. Values wider
/// than `T` are rejected rather than truncated.
pub fn decode<T: FixedWidth>(bytes: &[u8]) -> Result<(T, &[u8]), Error> {
    let (value, rest) = decode_u64(bytes)?;
    let value = <T as NumCast>::from(value).ok_or(Error::VLQOverflow)?;
    Ok((value, rest))
}
