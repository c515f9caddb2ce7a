//! Demo/bootstrap data: the admin account and the three planner members.
//!
//! Skips any user whose email already exists, so re-running is harmless.

use pauta_core::{
  store::DashboardStore,
  user::{NewUser, User, UserRole},
};

const TEAM: [(&str, UserRole); 4] = [
  ("Admin", UserRole::Admin),
  ("Pedro", UserRole::Member),
  ("Luiz", UserRole::Member),
  ("Kyles", UserRole::Member),
];

pub async fn run<S>(store: &S) -> Result<Vec<User>, S::Error>
where
  S: DashboardStore,
{
  let existing = store.list_users().await?;
  let mut created = Vec::new();

  for (name, role) in TEAM {
    let email = format!("{}@pauta.example", name.to_lowercase());
    if existing.iter().any(|u| u.email == email) {
      continue;
    }
    let user = store
      .add_user(NewUser { name: name.to_owned(), email, role })
      .await?;
    tracing::info!("seeded user {} <{}>", user.name, user.email);
    created.push(user);
  }

  Ok(created)
}
