mod as_crypto;
mod device;
mod random;
mod transcript;
