/// Errors produced while decoding positions and sequences
/// received from other replicas. Local edits never fail with an `Error`;
/// misuse of the local API (an out-of-bounds index, a bad
/// allocation range) panics instead.
#[derive(Clone, PartialEq, Debug, Fail)]
pub enum Error {
    #[fail(display = "position is not valid base64")]
    DeserializePosition,
    #[fail(display = "position has no segments")]
    EmptyPosition,
    #[fail(display = "position has trailing bytes")]
    TrailingBytes,
    #[fail(display = "sequence elements are not in ascending position order")]
    UnsortedElements,
    #[fail(display = "VLQ value has no terminating byte")]
    VLQNoTerminatingByte,
    #[fail(display = "VLQ value does not fit the integer width")]
    VLQOverflow,
}
