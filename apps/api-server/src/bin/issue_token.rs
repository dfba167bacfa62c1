//! Mint a bearer token signed with the configured `JWT_SECRET`.
//!
//! ```text
//! issue-token <email> [--admin]
//! ```

use anyhow::{Context, bail};
use uuid::Uuid;

use folio_core::permission::ADMIN_ROLE;
use folio_core::ports::TokenService;
use folio_infra::JwtTokenService;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut email = None;
    let mut admin = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--admin" => admin = true,
            flag if flag.starts_with('-') => bail!("unknown flag {flag}"),
            _ if email.is_some() => bail!("expected a single email address"),
            other => email = Some(other.to_string()),
        }
    }
    let email = email.context("usage: issue-token <email> [--admin]")?;

    let roles = if admin {
        vec![ADMIN_ROLE.to_string()]
    } else {
        Vec::new()
    };

    let service = JwtTokenService::from_env();
    let token = service
        .generate_token(Uuid::new_v4(), &email, roles)
        .context("failed to sign token")?;

    eprintln!(
        "token for {email} (admin: {admin}) valid for {}s",
        service.expiration_seconds()
    );
    println!("{token}");
    Ok(())
}
