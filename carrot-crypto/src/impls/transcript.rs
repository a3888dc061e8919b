use core::mem::size_of;
use curve25519_dalek::{edwards::CompressedEdwardsY, MontgomeryPoint, Scalar};
use generic_array::{ArrayLength, GenericArray};
use typenum::{Const, ToUInt, U32};

use crate::transcript::*;

macro_rules! impl_transcript_le_uint {
    ($($t:ident),+) => {$(
        impl ToTranscriptBytes for $t {
            type Len = <Const<{ size_of::<$t>() }> as ToUInt>::Output;
            fn to_transcript_bytes(&self) -> GenericArray<u8, Self::Len> {
                GenericArray::clone_from_slice(&self.to_le_bytes())
            }
        }

        #[cfg(test)]
        impl FromTranscriptBytes for $t {
            fn from_transcript_bytes(bytes: GenericArray<u8, Self::Len>) -> Option<Self> {
                Some(Self::from_le_bytes(bytes.as_slice().try_into().ok()?))
            }
        }
    )+};
}

impl_transcript_le_uint! {u8, u16, u32, u64}

// Going through a slice keeps this valid past generic-array's 32-element `From` impls, which
// matters for the 33-byte input context.
impl<const N: usize> ToTranscriptBytes for [u8; N]
where
    Const<N>: ToUInt,
    <Const<N> as ToUInt>::Output: ArrayLength<u8>,
{
    type Len = <Const<N> as ToUInt>::Output;
    fn to_transcript_bytes(&self) -> GenericArray<u8, Self::Len> {
        GenericArray::clone_from_slice(self)
    }
}

#[cfg(test)]
impl<const N: usize> FromTranscriptBytes for [u8; N]
where
    Const<N>: ToUInt,
    <Const<N> as ToUInt>::Output: ArrayLength<u8>,
{
    fn from_transcript_bytes(bytes: GenericArray<u8, Self::Len>) -> Option<Self> {
        bytes.as_slice().try_into().ok()
    }
}

macro_rules! impl_transcript_32_bytes {
    ($t:ty, $to_bytes:expr, $from_bytes:expr) => {
        impl ToTranscriptBytes for $t {
            type Len = U32;
            fn to_transcript_bytes(&self) -> GenericArray<u8, Self::Len> {
                GenericArray::from($to_bytes(self))
            }
        }

        #[cfg(test)]
        impl FromTranscriptBytes for $t {
            fn from_transcript_bytes(bytes: GenericArray<u8, Self::Len>) -> Option<Self> {
                $from_bytes(bytes.into())
            }
        }
    };
}

impl_transcript_32_bytes! {Scalar, Scalar::to_bytes,
    |b: [u8; 32]| Option::from(Scalar::from_canonical_bytes(b))}
impl_transcript_32_bytes! {CompressedEdwardsY, CompressedEdwardsY::to_bytes,
    |b: [u8; 32]| Some(CompressedEdwardsY(b))}
impl_transcript_32_bytes! {MontgomeryPoint, MontgomeryPoint::to_bytes,
    |b: [u8; 32]| Some(MontgomeryPoint(b))}
