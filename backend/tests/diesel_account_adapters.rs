//! Integration tests for the Diesel account adapters against embedded
//! PostgreSQL.
//!
//! Covers the transaction boundary that keeps user and manager rows in step,
//! unique username enforcement, and the account service driving the real
//! adapters.

use std::sync::Arc;

use editfolio::domain::ports::{
    AccountPersistenceError, AccountTransaction, CreateAdminRequest, ForceUpdateAdminRequest,
    ManagerRepository, UserAccounts, UserRepository, transaction_work,
};
use editfolio::domain::{
    Manager, Nickname, Password, PersonName, Role, User, UserAccountService, UserId, Username,
};
use editfolio::outbound::persistence::{
    DbPool, DieselAccountTransaction, DieselManagerRepository, DieselUserRepository,
};
use editfolio::outbound::token::JwtTokenIssuer;
use rstest::rstest;

mod support;

use support::test_database;

type DieselAccounts = UserAccountService<
    DieselUserRepository,
    DieselManagerRepository,
    DieselAccountTransaction,
    JwtTokenIssuer,
>;

struct Adapters {
    users: DieselUserRepository,
    managers: DieselManagerRepository,
    transaction: DieselAccountTransaction,
}

impl Adapters {
    fn new(pool: &DbPool) -> Self {
        Self {
            users: DieselUserRepository::new(pool.clone()),
            managers: DieselManagerRepository::new(pool.clone()),
            transaction: DieselAccountTransaction::new(pool.clone()),
        }
    }
}

fn service(pool: &DbPool) -> DieselAccounts {
    UserAccountService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselManagerRepository::new(pool.clone())),
        Arc::new(DieselAccountTransaction::new(pool.clone())),
        Arc::new(JwtTokenIssuer::new(
            b"integration-secret",
            chrono::Duration::minutes(5),
        )),
    )
}

fn username(raw: &str) -> Username {
    Username::new(raw).expect("valid username")
}

fn password(raw: &str) -> Password {
    Password::new(raw).expect("valid password")
}

fn admin_with_manager(email: &str) -> (User, Manager) {
    let user = User::create(Role::Admin, username(email), &password("Pw1!")).expect("hash");
    let manager = Manager::new(
        user.id(),
        PersonName::new("Kim").expect("valid name"),
        Nickname::new("K").expect("valid nickname"),
        username(email),
    );
    (user, manager)
}

#[rstest]
fn create_admin_commits_user_and_manager_rows() {
    let Some(db) = test_database() else {
        return;
    };
    let adapters = Adapters::new(&db.pool);
    let accounts = service(&db.pool);

    let id = db
        .runtime
        .block_on(accounts.create_admin(CreateAdminRequest {
            name: PersonName::new("Kim").expect("valid name"),
            email: username("a@b.com"),
            password: password("Pw1!"),
            nickname: Nickname::new("K").expect("valid nickname"),
        }))
        .expect("admin created");

    let user = db
        .runtime
        .block_on(adapters.users.find_by_id(&id))
        .expect("user lookup")
        .expect("user row committed");
    assert_eq!(user.role(), Role::Admin);
    assert_eq!(user.username().as_ref(), "a@b.com");
    assert!(user.compare_password(&password("Pw1!")));
    let manager = db
        .runtime
        .block_on(adapters.managers.find_by_user_id(&id))
        .expect("manager lookup")
        .expect("manager row committed");
    assert_eq!(manager.name().as_ref(), "Kim");
    assert_eq!(manager.nickname().as_ref(), "K");
}

#[rstest]
fn failing_work_rolls_back_the_user_row() {
    let Some(db) = test_database() else {
        return;
    };
    let adapters = Adapters::new(&db.pool);
    let (user, manager) = admin_with_manager("a@b.com");
    let id = user.id();

    let err = db
        .runtime
        .block_on(adapters.transaction.run(transaction_work(move |scope| {
            Box::pin(async move {
                scope.users().save(&user).await?;
                scope.managers().save(&manager).await?;
                Err(AccountPersistenceError::query("manager write rejected"))
            })
        })))
        .expect_err("work failed");

    assert_eq!(err, AccountPersistenceError::query("manager write rejected"));
    let user = db
        .runtime
        .block_on(adapters.users.find_by_id(&id))
        .expect("user lookup");
    assert!(user.is_none(), "user row must be rolled back");
    let manager = db
        .runtime
        .block_on(adapters.managers.find_by_user_id(&id))
        .expect("manager lookup");
    assert!(manager.is_none(), "manager row must be rolled back");
}

#[rstest]
fn manager_without_user_fails_at_commit_and_rolls_back() {
    let Some(db) = test_database() else {
        return;
    };
    let adapters = Adapters::new(&db.pool);
    let (user, _) = admin_with_manager("a@b.com");
    let (_, orphan) = admin_with_manager("other@b.com");
    let id = user.id();

    db.runtime
        .block_on(adapters.transaction.run(transaction_work(move |scope| {
            Box::pin(async move {
                scope.users().save(&user).await?;
                scope.managers().save(&orphan).await
            })
        })))
        .expect_err("deferred foreign key rejects the commit");

    let user = db
        .runtime
        .block_on(adapters.users.find_by_id(&id))
        .expect("user lookup");
    assert!(user.is_none(), "user row must be rolled back");
}

#[rstest]
fn username_collision_is_reported_as_duplicate() {
    let Some(db) = test_database() else {
        return;
    };
    let adapters = Adapters::new(&db.pool);
    let (first, _) = admin_with_manager("a@b.com");
    let second =
        User::create(Role::Customer, username("a@b.com"), &password("01012345678")).expect("hash");

    db.runtime
        .block_on(adapters.users.save(&first))
        .expect("first save");
    let err = db
        .runtime
        .block_on(adapters.users.save(&second))
        .expect_err("username taken");

    assert!(err.is_duplicate(), "expected Duplicate, got {err:?}");
    let missing = db
        .runtime
        .block_on(adapters.users.find_by_id(&second.id()))
        .expect("lookup");
    assert!(missing.is_none());
}

#[rstest]
fn force_update_rewrites_user_and_manager_rows() {
    let Some(db) = test_database() else {
        return;
    };
    let adapters = Adapters::new(&db.pool);
    let accounts = service(&db.pool);
    let id: UserId = db
        .runtime
        .block_on(accounts.create_admin(CreateAdminRequest {
            name: PersonName::new("Kim").expect("valid name"),
            email: username("a@b.com"),
            password: password("Pw1!"),
            nickname: Nickname::new("K").expect("valid nickname"),
        }))
        .expect("admin created");

    db.runtime
        .block_on(accounts.force_update_admin(ForceUpdateAdminRequest {
            user_id: id,
            username: username("lee@b.com"),
            name: PersonName::new("Lee").expect("valid name"),
            nickname: Nickname::new("L").expect("valid nickname"),
            password: password("reset"),
        }))
        .expect("force update");

    let user = db
        .runtime
        .block_on(adapters.users.find_by_id(&id))
        .expect("user lookup")
        .expect("user kept");
    assert_eq!(user.username().as_ref(), "lee@b.com");
    assert!(user.compare_password(&password("reset")));
    assert!(!user.compare_password(&password("Pw1!")));
    let manager = db
        .runtime
        .block_on(adapters.managers.find_by_user_id(&id))
        .expect("manager lookup")
        .expect("manager kept");
    assert_eq!(manager.name().as_ref(), "Lee");
    assert_eq!(manager.nickname().as_ref(), "L");
    assert_eq!(manager.username().as_ref(), "lee@b.com");
}
