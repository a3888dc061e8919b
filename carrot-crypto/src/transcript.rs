use generic_array::{ArrayLength, GenericArray};

/// A value with a fixed-width, little-endian transcript encoding.
///
/// The encoded width is carried in the type so that a whole transcript's length can be summed at
/// compile time. Signed integers intentionally have no implementation.
pub trait ToTranscriptBytes {
    type Len: ArrayLength<u8>;
    fn to_transcript_bytes(&self) -> GenericArray<u8, Self::Len>;
}

#[cfg(test)]
pub trait FromTranscriptBytes: ToTranscriptBytes + Sized {
    fn from_transcript_bytes(bytes: GenericArray<u8, Self::Len>) -> Option<Self>;
}

/// Type-level sum of the encoded widths of a list of transcript field types.
macro_rules! transcript_fields_len {
    () => { typenum::U0 };
    ($field_type:path) => { <$field_type as ToTranscriptBytes>::Len };
    ($field_type:path, $($field_types:path),+) => {
        typenum::Sum<
            transcript_fields_len!($field_type),
            transcript_fields_len!($($field_types),+)
        >
    };
}

/// Copies `src` into `dst` at `*offset` and advances the offset.
#[inline(always)]
pub(crate) fn append_transcript_field(dst: &mut [u8], offset: &mut usize, src: &[u8]) {
    let end = *offset + src.len();
    dst[*offset..end].copy_from_slice(src);
    *offset = end;
}

/// Builds `[len(domain_sep)] || domain_sep || field_1 || ... || field_n` on the stack.
///
/// Every field is written with the annotated type's [`ToTranscriptBytes`] encoding, so the
/// buffer length is a constant of the call site.
macro_rules! make_carrot_transcript {
    ($domain_sep:path, $($field_type:path : $field:expr),* $(,)?) => {{
        const DOMAIN_SEP_LEN: usize = $domain_sep.len();
        const _: () = assert!(DOMAIN_SEP_LEN < 256);
        const TRANSCRIPT_LEN: usize = 1 + DOMAIN_SEP_LEN
            + <transcript_fields_len!($($field_type),*) as typenum::Unsigned>::USIZE;

        let mut transcript = [0u8; TRANSCRIPT_LEN];
        transcript[0] = DOMAIN_SEP_LEN as u8;
        let mut offset = 1usize;
        append_transcript_field(&mut transcript, &mut offset, $domain_sep.as_bytes());
        $(
            append_transcript_field(
                &mut transcript,
                &mut offset,
                <$field_type as ToTranscriptBytes>::to_transcript_bytes($field).as_slice(),
            );
        )*
        debug_assert_eq!(offset, TRANSCRIPT_LEN);
        transcript
    }};
}

pub(crate) use make_carrot_transcript;
pub(crate) use transcript_fields_len;
