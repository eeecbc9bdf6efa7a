//! 登录、登出、当前用户和菜单

use anyhow::Result;
use tracing::warn;

use academy_core::access::menu_items;
use academy_core::dates::format_date;

use super::{or_dash, Context};

pub async fn login(ctx: &mut Context, username: &str, password: &str) -> Result<()> {
    let response = ctx.client.auth().login(username, password).await?;
    let user = response.user;
    println!("{} {}님, 환영합니다.", user.role.label(), user.name);
    ctx.remember(user)
}

/// 后端登出失败时仍删除本地会话
pub async fn logout(ctx: &mut Context) -> Result<()> {
    if ctx.user().is_ok() {
        if let Err(err) = ctx.client.auth().logout().await {
            warn!(error = %err, "로그아웃 요청 실패, 로컬 세션만 삭제");
        }
    }
    if ctx.forget()? {
        println!("로그아웃되었습니다.");
    } else {
        println!("로그인 상태가 아닙니다.");
    }
    Ok(())
}

/// 从后端刷新当前用户
pub async fn whoami(ctx: &mut Context) -> Result<()> {
    ctx.user()?;
    let user = ctx.client.users().profile().await?;
    println!("아이디: {}", user.username);
    println!("이름: {}", user.name);
    println!("역할: {}", user.role.label());
    println!("과목: {}", or_dash(user.subject.map(|s| s.label())));
    if let Some(joined) = user.date_joined {
        println!("가입일: {}", format_date(joined.date_naive()));
    }
    ctx.remember(user)
}

pub fn menu(ctx: &Context) -> Result<()> {
    let user = ctx.user()?;
    for item in menu_items(user.role) {
        println!("{:<10} {}", item.label, item.path);
    }
    Ok(())
}
