//! 회원 관리 명령

use anyhow::Result;

use academy_core::access::{can_assign_role, can_edit_user, can_reset_password};
use academy_core::validation::validate_new_password;
use academy_core::{
    AccessDenied, NewUser, PasswordChange, ProfileUpdate, Role, RouteRequirement, User, UserUpdate,
};

use super::{done, or_dash, Context};
use crate::cli::UsersCommand;

fn manage_users() -> RouteRequirement {
    RouteRequirement::AnyOf(vec![Role::Admin, Role::Teacher])
}

fn print_user(user: &User) {
    println!(
        "{:>4}  {:<16} {:<10} {:<6} {}",
        user.id,
        user.username,
        user.name,
        user.role.label(),
        or_dash(user.subject.map(|s| s.label()))
    );
}

pub async fn run(ctx: &mut Context, command: UsersCommand) -> Result<()> {
    match command {
        UsersCommand::List => {
            ctx.require(manage_users())?;
            let users = ctx.client.users().list().await?;
            for user in &users {
                print_user(user);
            }
            println!("총 {}명", users.len());
        }
        UsersCommand::Show { id } => {
            ctx.require(manage_users())?;
            print_user(&ctx.client.users().get(id).await?);
        }
        UsersCommand::Create {
            username,
            name,
            role,
            subject,
            password,
            confirm_password,
        } => {
            let actor = ctx.require(manage_users())?;
            if !can_assign_role(actor.role, role) {
                return Err(
                    AccessDenied::new(actor.role, format!("{} 생성", role.label())).into(),
                );
            }
            let new_user = NewUser {
                username,
                password,
                confirm_password,
                name,
                role,
                subject,
            };
            new_user.validate()?;
            let created = ctx.client.users().create(&new_user).await?;
            println!("회원이 생성되었습니다.");
            print_user(&created);
        }
        UsersCommand::Edit {
            id,
            name,
            role,
            subject,
        } => {
            let actor = ctx.require(manage_users())?;
            let update = UserUpdate {
                name,
                role,
                subject,
                new_password: None,
            };
            update.validate()?;
            let target = ctx.client.users().get(id).await?;
            if !can_edit_user(actor, &target) {
                return Err(
                    AccessDenied::new(actor.role, format!("{} 수정", target.role.label())).into(),
                );
            }
            if let Some(role) = role {
                if !can_assign_role(actor.role, role) {
                    return Err(
                        AccessDenied::new(actor.role, format!("{} 지정", role.label())).into(),
                    );
                }
            }
            let updated = ctx.client.users().update(id, &update).await?;
            println!("회원 정보가 수정되었습니다.");
            print_user(&updated);
        }
        UsersCommand::ProfileEdit { name, subject } => {
            ctx.require_profile_edit()?;
            let update = ProfileUpdate { name, subject };
            update.validate()?;
            let updated = ctx.client.users().update_profile(&update).await?;
            println!("프로필이 수정되었습니다.");
            print_user(&updated);
            ctx.remember(updated)?;
        }
        UsersCommand::Delete { id } => {
            let actor = ctx.require(manage_users())?;
            let target = ctx.client.users().get(id).await?;
            if !can_edit_user(actor, &target) {
                return Err(
                    AccessDenied::new(actor.role, format!("{} 삭제", target.role.label())).into(),
                );
            }
            let response = ctx.client.users().delete(id).await?;
            println!("{}", done(&response.message, "회원이 삭제되었습니다."));
        }
        UsersCommand::Passwd {
            id: None,
            old,
            new,
            confirm,
        } => {
            ctx.user()?;
            let change = PasswordChange {
                old_password: old.unwrap_or_default(),
                new_password: new,
                confirm_password: confirm,
            };
            change.validate()?;
            let response = ctx.client.users().change_password(&change).await?;
            println!("{}", done(&response.message, "비밀번호가 변경되었습니다."));
        }
        UsersCommand::Passwd {
            id: Some(id),
            new,
            confirm,
            ..
        } => {
            let actor = ctx.require(manage_users())?;
            let target = ctx.client.users().get(id).await?;
            if !can_reset_password(actor, &target) {
                return Err(
                    AccessDenied::new(actor.role, format!("{} 비밀번호 초기화", target.role.label())).into(),
                );
            }
            validate_new_password(&new, &confirm)?;
            let update = UserUpdate {
                new_password: Some(new),
                ..UserUpdate::default()
            };
            ctx.client.users().update(id, &update).await?;
            println!("{}의 비밀번호가 초기화되었습니다.", target.username);
        }
    }
    Ok(())
}

