//! # Service Registry
//!
//! 싱글톤 기반 의존성 주입 컨테이너입니다.
//!
//! `#[service]` / `#[repository]` 매크로와 수동 `inventory::submit!` 등록이
//! 컴파일 타임에 [`ServiceRegistration`] / [`RepositoryRegistration`]을 수집하고,
//! [`ServiceLocator`]가 런타임에 타입 이름으로 등록 정보를 찾아 인스턴스를 생성합니다.
//!
//! ## 이름 규칙
//!
//! 타입 이름에서 `Service` / `Repository` 접미사를 뗀 소문자 이름이
//! 등록 이름(`_service` / `_repository` 접미사 제거)과 일치해야 합니다.
//!
//! ```text
//! UserRepository          → "user"          ← #[repository(name = "user")]
//! VerificationRepository  → "verification"  ← #[repository(name = "verification")]
//! MailService             → "mail"          ← "mail_service"
//! CipherService           → "cipher"        ← "cipher_service"
//! ```
//!
//! ## 동작 순서
//!
//! ```text
//! 1. 인프라 등록      ServiceLocator::set(Arc<Database>), set(Arc<RedisClient>)
//! 2. 일괄 초기화      ServiceLocator::initialize_all()
//!    ├─ 리포지토리 생성
//!    └─ 서비스 생성
//! 3. 지연 해결        Arc<T> 필드 → ServiceLocator::get::<T>()
//! ```

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;

/// 비즈니스 로직 서비스 공통 인터페이스 (`#[service]`가 구현)
#[async_trait]
pub trait Service: Send + Sync {
    fn name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 리포지토리 공통 인터페이스 (`#[repository]`가 구현)
#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;

    /// 연결된 MongoDB 컬렉션 이름
    fn collection_name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 서비스 등록 정보
pub struct ServiceRegistration {
    pub name: &'static str,
    /// `Box<Arc<T>>`를 반환하는 생성 함수
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// 리포지토리 등록 정보
pub struct RepositoryRegistration {
    pub name: &'static str,
    /// `Box<Arc<T>>`를 반환하는 생성 함수
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|registration| (normalize_registration_name(registration.name), registration))
        .collect();

    log::debug!("🗂️ Service 캐시 구성: {}개", cache.len());
    cache
});

static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|registration| (normalize_registration_name(registration.name), registration))
        .collect();

    log::debug!("🗂️ Repository 캐시 구성: {}개", cache.len());
    cache
});

/// `user_service` / `user_repository` → `user`
fn normalize_registration_name(name: &str) -> String {
    name.strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name)
        .to_string()
}

/// `chat_user_service::services::mail::MailService` → `MailService`
fn short_type_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

/// 레지스트리 조회 키: 컴포넌트 종류와 소문자 엔티티 이름
fn lookup_key(type_name: &str) -> Option<(ComponentKind, String)> {
    let short = short_type_name(type_name);

    if let Some(entity) = short.strip_suffix("Repository") {
        return Some((ComponentKind::Repository, entity.to_lowercase()));
    }
    if let Some(entity) = short.strip_suffix("Service") {
        return Some((ComponentKind::Service, entity.to_lowercase()));
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ComponentKind {
    Repository,
    Service,
}

/// 싱글톤 의존성 주입 컨테이너
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(|| ServiceLocator {
    instances: RwLock::new(HashMap::new()),
    initializing: RwLock::new(HashSet::new()),
});

impl ServiceLocator {
    /// 타입 `T`의 싱글톤 인스턴스를 반환합니다.
    ///
    /// 이미 생성된 인스턴스가 있으면 그대로 반환하고, 없으면 등록 정보에서
    /// 생성 함수를 찾아 인스턴스를 만든 뒤 캐시합니다.
    ///
    /// # Panics
    ///
    /// - 등록되지 않은 타입을 요청한 경우
    /// - 순환 의존성이 감지된 경우
    ///
    /// 두 경우 모두 애플리케이션 구성 오류이므로 기동 시점에 즉시 드러납니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = Self::cached::<T>(type_id) {
            return instance;
        }

        {
            let mut initializing = LOCATOR.initializing.write().unwrap_or_else(|e| e.into_inner());
            if !initializing.insert(type_id) {
                log::error!("❌ 순환 의존성 감지: {}", type_name);
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        let created = Self::construct::<T>(type_name);

        LOCATOR.initializing
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&type_id);

        match created {
            Some(instance) => {
                // 생성 중 다른 경로로 먼저 등록된 인스턴스가 있으면 그것을 우선합니다
                let mut instances = LOCATOR.instances.write().unwrap_or_else(|e| e.into_inner());
                let entry = instances
                    .entry(type_id)
                    .or_insert_with(|| instance as Arc<dyn Any + Send + Sync>);
                entry.clone()
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("Type mismatch in ServiceLocator: {}", type_name))
            }
            None => panic!(
                "Service not found: {}. Register it with #[service]/#[repository], inventory::submit! or ServiceLocator::set()",
                type_name
            ),
        }
    }

    fn cached<T: 'static + Send + Sync>(type_id: TypeId) -> Option<Arc<T>> {
        let instances = LOCATOR.instances.read().unwrap_or_else(|e| e.into_inner());
        instances
            .get(&type_id)
            .and_then(|instance| instance.clone().downcast::<T>().ok())
    }

    fn construct<T: 'static + Send + Sync>(type_name: &str) -> Option<Arc<T>> {
        let (kind, entity) = lookup_key(type_name)?;

        let boxed = match kind {
            ComponentKind::Repository => (REPOSITORY_NAME_CACHE.get(&entity)?.constructor)(),
            ComponentKind::Service => (SERVICE_NAME_CACHE.get(&entity)?.constructor)(),
        };

        match boxed.downcast::<Arc<T>>() {
            Ok(arc) => Some(*arc),
            Err(_) => {
                log::error!("❌ 등록 타입 불일치: {} ({:?} '{}')", type_name, kind, entity);
                None
            }
        }
    }

    /// 이미 생성된 인프라 인스턴스(Database, RedisClient 등)를 직접 등록합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_name = std::any::type_name::<T>();
        log::info!("📦 Registering: {}", short_type_name(type_name));

        LOCATOR.instances
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 모든 리포지토리와 서비스를 생성합니다.
    ///
    /// 리포지토리를 먼저 생성한 뒤 서비스를 생성하므로,
    /// 서비스 생성 시점에는 하위 계층이 모두 준비되어 있습니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        log::info!("🔄 서비스 레지스트리 초기화 시작");

        let mut repo_count = 0;
        for registration in inventory::iter::<RepositoryRegistration>() {
            let _instance = (registration.constructor)();
            log::debug!("   ├─ {}: ✓ Created", registration.name);
            repo_count += 1;
        }
        log::info!("✓ Repository 인스턴스 생성 완료 ({}개)", repo_count);

        let mut service_count = 0;
        for registration in inventory::iter::<ServiceRegistration>() {
            let _instance = (registration.constructor)();
            log::debug!("   ├─ {}: ✓ Created", registration.name);
            service_count += 1;
        }
        log::info!("✓ Service 인스턴스 생성 완료 ({}개)", service_count);

        log::info!(
            "🎉 SERVICE REGISTRY INITIALIZED - Repositories: {}, Services: {}",
            repo_count,
            service_count
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_registration_name() {
        assert_eq!(normalize_registration_name("mail_service"), "mail");
        assert_eq!(normalize_registration_name("verification_repository"), "verification");
        assert_eq!(normalize_registration_name("user"), "user");
    }

    #[test]
    fn test_lookup_key_from_type_name() {
        assert_eq!(
            lookup_key("chat_user_service::repositories::users::user_repo::UserRepository"),
            Some((ComponentKind::Repository, "user".to_string()))
        );
        assert_eq!(
            lookup_key("chat_user_service::services::auth::cipher_service::CipherService"),
            Some((ComponentKind::Service, "cipher".to_string()))
        );
        assert_eq!(lookup_key("chat_user_service::db::Database"), None);
    }

    #[test]
    fn test_set_and_get_infrastructure_instance() {
        struct StubClient {
            id: u32,
        }

        ServiceLocator::set(Arc::new(StubClient { id: 7 }));
        let resolved = ServiceLocator::get::<StubClient>();
        assert_eq!(resolved.id, 7);
    }
}
