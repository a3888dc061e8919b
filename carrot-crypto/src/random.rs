use rand_core::CryptoRngCore;

/// Sampling of a value from a cryptographic RNG, optionally shaped by `Params`
pub trait Random: Sized {
    type Params;
    fn new_random_with_params<R: CryptoRngCore + ?Sized>(rng: &mut R, p: Self::Params) -> Self;
}

/// Sample a parameterless [`Random`] value
pub fn new_random<T, R>(rng: &mut R) -> T
where
    T: Random<Params = ()>,
    R: CryptoRngCore + ?Sized,
{
    T::new_random_with_params(rng, ())
}

/// Sample a [`Random`] value shaped by `p`
pub fn new_random_with_params<T, R>(rng: &mut R, p: T::Params) -> T
where
    T: Random,
    R: CryptoRngCore + ?Sized,
{
    T::new_random_with_params(rng, p)
}
