use super::*;
use groupvest_shared::{AdminProfile, GroupProperties, PlatformUser};

// =========================================================
// Test fixtures
// =========================================================

fn group(slug: &str) -> GroupProperties {
    GroupProperties {
        id: format!("id-{}", slug),
        group_user_name: slug.to_string(),
        display_name: slug.to_uppercase(),
        parent_group_id: None,
    }
}

fn membership(slug: &str, role: UserRole) -> GroupMembership {
    GroupMembership {
        group: group(slug),
        role,
    }
}

fn investor(home: Option<&str>) -> CurrentUser {
    CurrentUser::User(PlatformUser {
        uid: "u1".into(),
        email: "investor@example.com".into(),
        display_name: "Ines".into(),
        role: UserRole::Investor,
        home_group_user_name: home.map(str::to_string),
    })
}

fn issuer() -> CurrentUser {
    CurrentUser::User(PlatformUser {
        uid: "u2".into(),
        email: "issuer@example.com".into(),
        display_name: "Ivan".into(),
        role: UserRole::Issuer,
        home_group_user_name: None,
    })
}

fn super_admin() -> CurrentUser {
    CurrentUser::Admin(AdminProfile {
        uid: "a1".into(),
        email: "root@example.com".into(),
        display_name: "Root".into(),
        super_admin: true,
        administered_groups: vec![],
    })
}

fn group_admin(slugs: &[&str]) -> CurrentUser {
    CurrentUser::Admin(AdminProfile {
        uid: "a2".into(),
        email: "admin@example.com".into(),
        display_name: "Ada".into(),
        super_admin: false,
        administered_groups: slugs.iter().map(|s| group(s)).collect(),
    })
}

fn view<'a>(user: &'a CurrentUser, memberships: &'a [GroupMembership]) -> SessionView<'a> {
    SessionView {
        user: Some(user),
        memberships,
    }
}

// =========================================================
// Parsing
// =========================================================

#[test]
fn parses_global_routes() {
    assert_eq!(
        AppRoute::from_path("/"),
        AppRoute::FrontPage { scope: None }
    );
    assert_eq!(AppRoute::from_path("/signin"), AppRoute::SignIn { scope: None });
    assert_eq!(
        AppRoute::from_path("/admin"),
        AppRoute::AdminDashboard { scope: None }
    );
    assert_eq!(
        AppRoute::from_path("/projects/p42"),
        AppRoute::OfferDetail {
            scope: None,
            project_id: "p42".into()
        }
    );
    assert_eq!(AppRoute::from_path("/error/404"), AppRoute::NotFound);
    assert_eq!(AppRoute::from_path("/auth/action"), AppRoute::AuthAction);
}

#[test]
fn parses_group_scoped_routes() {
    assert_eq!(
        AppRoute::from_path("/groups/acme"),
        AppRoute::FrontPage {
            scope: Some(GroupScope::group("acme"))
        }
    );
    assert_eq!(
        AppRoute::from_path("/groups/acme/signin"),
        AppRoute::SignIn {
            scope: Some(GroupScope::group("acme"))
        }
    );
    assert_eq!(
        AppRoute::from_path("/groups/acme/dashboard/investor"),
        AppRoute::InvestorDashboard {
            scope: GroupScope::group("acme")
        }
    );
    assert_eq!(
        AppRoute::from_path("/groups/acme/admin"),
        AppRoute::AdminDashboard {
            scope: Some(GroupScope::group("acme"))
        }
    );
    assert_eq!(
        AppRoute::from_path("/groups/acme/projects/p1"),
        AppRoute::OfferDetail {
            scope: Some(GroupScope::group("acme")),
            project_id: "p1".into()
        }
    );
}

#[test]
fn reserved_tokens_win_over_course_slugs() {
    // "signin" 是保留词，解析为页面而非课程
    assert_eq!(
        AppRoute::from_path("/groups/acme/signin"),
        AppRoute::SignIn {
            scope: Some(GroupScope::group("acme"))
        }
    );
    // 非保留词按课程处理
    assert_eq!(
        AppRoute::from_path("/groups/acme/physics101"),
        AppRoute::FrontPage {
            scope: Some(GroupScope::course("acme", "physics101"))
        }
    );
    assert_eq!(
        AppRoute::from_path("/groups/acme/physics101/dashboard/investor"),
        AppRoute::InvestorDashboard {
            scope: GroupScope::course("acme", "physics101")
        }
    );
}

#[test]
fn signup_with_invited_id() {
    assert_eq!(
        AppRoute::from_path("/groups/acme/signup/inv9"),
        AppRoute::SignUp {
            scope: Some(GroupScope::group("acme")),
            invited_id: Some("inv9".into())
        }
    );
}

#[test]
fn unknown_paths_resolve_to_not_found() {
    assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    assert_eq!(AppRoute::from_path("/groups"), AppRoute::NotFound);
    assert_eq!(
        AppRoute::from_path("/groups/acme/physics101/bogus/deep"),
        AppRoute::NotFound
    );
    // 仪表盘与创建项目不存在全局形式
    assert_eq!(AppRoute::from_path("/dashboard/investor"), AppRoute::NotFound);
    assert_eq!(AppRoute::from_path("/create-offer"), AppRoute::NotFound);
}

#[test]
fn to_path_round_trips() {
    for path in [
        "/",
        "/signin",
        "/signup",
        "/admin",
        "/projects/p7",
        "/groups/acme",
        "/groups/acme/signin",
        "/groups/acme/admin",
        "/groups/acme/dashboard/issuer",
        "/groups/acme/create-offer",
        "/groups/acme/physics101/dashboard/investor",
        "/groups/acme/group-details/other",
        "/groups/acme/resources/r1",
        "/contact-us",
        "/terms-of-use",
        "/auth/action",
        "/error/404",
    ] {
        assert_eq!(AppRoute::from_path(path).to_path(), path, "path: {}", path);
    }
}

// =========================================================
// Predicates
// =========================================================

#[test]
fn public_allow_list_is_not_protected() {
    let public = [
        "/",
        "/groups/acme",
        "/signin",
        "/groups/acme/signin",
        "/signup",
        "/groups/acme/signup/inv1",
        "/contact-us",
        "/terms-of-use",
        "/privacy-policy",
        "/risk-warning",
        "/marketing-preferences",
        "/error/404",
        "/projects/p1",
        "/groups/acme/projects/p1",
        "/auth/action",
    ];
    for path in public {
        assert!(!AppRoute::from_path(path).is_protected(), "path: {}", path);
    }
}

#[test]
fn everything_else_is_protected() {
    let protected = [
        "/admin",
        "/groups/acme/admin",
        "/groups/acme/dashboard/investor",
        "/groups/acme/dashboard/issuer",
        "/groups/acme/create-offer",
        "/profile",
        "/groups/acme/profile",
        "/help",
        "/group-details/other",
        "/resources/r1",
    ];
    for path in protected {
        assert!(AppRoute::from_path(path).is_protected(), "path: {}", path);
    }
}

#[test]
fn admin_route_classification() {
    let platform = AppRoute::from_path("/admin");
    assert!(platform.is_reserved_for_super_admin());
    assert!(!platform.is_group_admin_route());

    let group = AppRoute::from_path("/groups/acme/admin");
    assert!(!group.is_reserved_for_super_admin());
    assert!(group.is_group_admin_route());
}

// =========================================================
// Constructors: non-empty absolute paths for every combination
// =========================================================

#[test]
fn constructors_always_return_absolute_paths() {
    let scope = GroupScope::group("acme");
    let memberships = [membership("acme", UserRole::Investor)];
    let users = [
        investor(Some("acme")),
        investor(None),
        issuer(),
        super_admin(),
        group_admin(&["acme"]),
        group_admin(&["acme", "beta"]),
        group_admin(&[]),
    ];

    let mut sessions: Vec<SessionView<'_>> = vec![SessionView::default()];
    for user in &users {
        sessions.push(view(user, &memberships));
        sessions.push(view(user, &[]));
    }

    for session in &sessions {
        for scope in [None, Some(&scope)] {
            for path in [
                construct_home_route(scope, session),
                construct_dashboard_route(scope, session),
                construct_sign_in_route(scope),
                construct_sign_up_route(scope, None),
                construct_sign_up_route(scope, Some("inv1")),
                construct_project_detail_route(scope, "p1"),
                construct_create_project_route(scope),
                construct_group_detail_route(scope, "other"),
                construct_view_resource_detail_route(scope, "r1"),
                construct_contact_us_route(scope),
            ] {
                assert!(!path.is_empty());
                assert!(path.starts_with('/'), "relative path: {}", path);
            }
        }
    }
}

#[test]
fn home_route_follows_role() {
    let scope = GroupScope::group("acme");
    let memberships = [membership("acme", UserRole::Investor)];

    // 未认证：当前作用域的公开首页
    assert_eq!(
        construct_home_route(Some(&scope), &SessionView::default()),
        "/groups/acme"
    );
    assert_eq!(construct_home_route(None, &SessionView::default()), "/");

    // 超级管理员：全局首页
    let root = super_admin();
    assert_eq!(construct_home_route(Some(&scope), &view(&root, &[])), "/");

    // 群组管理员：唯一管理群组的首页
    let ada = group_admin(&["beta"]);
    assert_eq!(
        construct_home_route(Some(&scope), &view(&ada, &[])),
        "/groups/beta"
    );

    // 成员：URL 群组优先
    let ines = investor(Some("delta"));
    assert_eq!(
        construct_home_route(Some(&scope), &view(&ines, &memberships)),
        "/groups/acme"
    );
    // 非成员：回落主群组
    assert_eq!(
        construct_home_route(Some(&GroupScope::group("other")), &view(&ines, &memberships)),
        "/groups/delta"
    );
    // 主群组也缺省：全局首页
    let drifter = investor(None);
    assert_eq!(
        construct_home_route(Some(&GroupScope::group("other")), &view(&drifter, &[])),
        "/"
    );
}

#[test]
fn dashboard_route_follows_role() {
    let scope = GroupScope::group("acme");
    let memberships = [membership("acme", UserRole::Investor)];

    let root = super_admin();
    assert_eq!(
        construct_dashboard_route(Some(&scope), &view(&root, &[])),
        "/admin?tab=Home"
    );

    let ada = group_admin(&["acme"]);
    assert_eq!(
        construct_dashboard_route(None, &view(&ada, &[])),
        "/groups/acme/admin?tab=Home"
    );

    let ines = investor(None);
    assert_eq!(
        construct_dashboard_route(Some(&scope), &view(&ines, &memberships)),
        "/groups/acme/dashboard/investor?tab=Home"
    );

    // 课程作用域随 URL 保留
    let course = GroupScope::course("acme", "physics101");
    assert_eq!(
        construct_dashboard_route(Some(&course), &view(&ines, &memberships)),
        "/groups/acme/physics101/dashboard/investor?tab=Home"
    );

    // 非成员回落主群组
    let homebody = investor(Some("delta"));
    assert_eq!(
        construct_dashboard_route(Some(&GroupScope::group("other")), &view(&homebody, &[])),
        "/groups/delta/dashboard/investor?tab=Home"
    );
}

// =========================================================
// Query string
// =========================================================

#[test]
fn query_parsing() {
    let q = Query::parse("?tab=Offers&edit=p1");
    assert_eq!(q.tab(), Some("Offers"));
    assert_eq!(q.get("edit"), Some("p1"));
    assert_eq!(q.get("missing"), None);

    let bare = Query::parse("admin=a1&issuer=u2");
    assert_eq!(bare.get("admin"), Some("a1"));
    assert_eq!(bare.get("issuer"), Some("u2"));

    assert_eq!(Query::parse("").get("tab"), None);
}
