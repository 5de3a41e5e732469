//! Generación de códigos de acceso de equipos
//!
//! Los códigos tienen 6 caracteres `A-Z0-9`. La fuente aleatoria se pasa
//! explícitamente en cada llamada y la unicidad la decide el almacén inyectado.

use async_trait::async_trait;
use rand::Rng;
use std::collections::HashSet;
use tokio::sync::RwLock;

use crate::utils::errors::{AppError, AppResult};

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const ACCESS_CODE_LENGTH: usize = 6;
const DEFAULT_MAX_ATTEMPTS: usize = 32;

/// Almacén de códigos ya asignados
#[async_trait]
pub trait AccessCodeStore: Send + Sync {
    /// Reservar un código; `false` si ya estaba asignado
    async fn reserve(&self, code: &str) -> bool;
}

/// Almacén en memoria del proceso
#[derive(Default)]
pub struct InMemoryAccessCodeStore {
    codes: RwLock<HashSet<String>>,
}

impl InMemoryAccessCodeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccessCodeStore for InMemoryAccessCodeStore {
    async fn reserve(&self, code: &str) -> bool {
        self.codes.write().await.insert(code.to_string())
    }
}

/// Generar un código aleatorio (sin comprobar unicidad)
pub fn random_access_code<R: Rng>(rng: &mut R) -> String {
    (0..ACCESS_CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

pub struct TeamCodeService<S: AccessCodeStore> {
    store: S,
    max_attempts: usize,
}

impl<S: AccessCodeStore> TeamCodeService<S> {
    pub fn new(store: S) -> Self {
        Self { store, max_attempts: DEFAULT_MAX_ATTEMPTS }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generar y reservar un código que no esté en uso
    pub async fn generate_unique_code<R: Rng + Send>(&self, rng: &mut R) -> AppResult<String> {
        for attempt in 1..=self.max_attempts {
            let code = random_access_code(rng);
            if self.store.reserve(&code).await {
                log::info!("🔑 Código de acceso generado en {} intento(s)", attempt);
                return Ok(code);
            }
            log::debug!("🔁 Código {} ya en uso, reintentando", code);
        }

        Err(AppError::ServiceUnavailable(format!(
            "Could not generate a unique access code after {} attempts",
            self.max_attempts
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn codes_use_the_expected_alphabet_and_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let code = random_access_code(&mut rng);
            assert_eq!(code.len(), ACCESS_CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn same_seed_gives_same_code() {
        let first = random_access_code(&mut StdRng::seed_from_u64(42));
        let second = random_access_code(&mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn generated_codes_are_reserved_and_unique() {
        let service = TeamCodeService::new(InMemoryAccessCodeStore::new());
        let mut rng = StdRng::seed_from_u64(1);

        let first = service.generate_unique_code(&mut rng).await.unwrap();
        let second = service.generate_unique_code(&mut rng).await.unwrap();

        assert_ne!(first, second);
        // ya reservados: una segunda reserva falla
        assert!(!service.store().reserve(&first).await);
        assert!(!service.store().reserve(&second).await);
    }

    #[tokio::test]
    async fn collision_with_existing_code_is_retried() {
        let taken = random_access_code(&mut StdRng::seed_from_u64(9));
        let store = InMemoryAccessCodeStore::new();
        assert!(store.reserve(&taken).await);

        let service = TeamCodeService::new(store);
        let code = service
            .generate_unique_code(&mut StdRng::seed_from_u64(9))
            .await
            .unwrap();

        assert_ne!(code, taken);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let taken = random_access_code(&mut StdRng::seed_from_u64(3));
        let store = InMemoryAccessCodeStore::new();
        store.reserve(&taken).await;

        let service = TeamCodeService::new(store).with_max_attempts(1);
        let result = service.generate_unique_code(&mut StdRng::seed_from_u64(3)).await;

        assert!(matches!(result, Err(AppError::ServiceUnavailable(_))));
    }
}
