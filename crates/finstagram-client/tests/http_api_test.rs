//! `HttpApi` against an in-process warp backend that mimics the Flask routes.

use std::net::SocketAddr;

use finstagram_client::{Api, ApiError, HttpApi};
use finstagram_proto::{Credentials, OutgoingMessage, ProfileDraft};
use serde_json::json;
use warp::{Filter, http::StatusCode};

async fn spawn_backend() -> SocketAddr {
    let login = warp::path!("api" / "login").and(warp::post()).and(warp::body::json()).map(
        |body: Credentials| {
            if body.password == "x" {
                warp::reply::with_status(
                    warp::reply::json(&json!({
                        "message": "Login Successful!",
                        "username": body.username,
                        "hasProfile": false,
                    })),
                    StatusCode::OK,
                )
            } else {
                warp::reply::with_status(
                    warp::reply::json(&json!({ "message": "Invalid Credentials" })),
                    StatusCode::UNAUTHORIZED,
                )
            }
        },
    );

    let create_profile = warp::path!("api" / "create-profile").and(warp::post())
        .and(warp::body::json())
        .map(|_: ProfileDraft| warp::reply::json(&json!({ "message": "Profile saved!" })));

    let chat_list = warp::path!("api" / "chat-list" / String).and(warp::get()).map(|_: String| {
        warp::reply::json(&json!([
            { "username": "bob", "avatar": null },
            { "username": "carol", "avatar": "http://host/c.png" },
        ]))
    });

    let messages = warp::path!("api" / "messages" / String / String).and(warp::get()).map(
        |user: String, peer: String| {
            warp::reply::json(&json!([
                { "sender": peer, "receiver": user, "text": "hi", "timestamp": "t1" },
            ]))
        },
    );

    let send = warp::path!("api" / "send-message").and(warp::post())
        .and(warp::body::json())
        .map(|message: OutgoingMessage| {
            if message.receiver == "ghost" {
                warp::reply::with_status(warp::reply::html("boom"), StatusCode::BAD_GATEWAY)
            } else {
                warp::reply::with_status(warp::reply::html("ok"), StatusCode::OK)
            }
        });

    let notifications =
        warp::path!("notifications" / String).and(warp::get()).map(|_: String| {
            warp::reply::json(&json!([{ "message": "Welcome to Finstagram!", "time": null }]))
        });

    let routes =
        login.or(create_profile).or(chat_list).or(messages).or(send).or(notifications);

    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}

fn api_for(addr: SocketAddr) -> HttpApi {
    HttpApi::new(&format!("http://{addr}")).unwrap()
}

#[tokio::test]
async fn login_success_reports_profile_flag() {
    let api = api_for(spawn_backend().await);

    let reply = api.login(&Credentials::new("abc", "x")).await.unwrap();

    assert_eq!(reply.username, "abc");
    assert!(!reply.has_profile);
}

#[tokio::test]
async fn login_rejection_carries_server_message() {
    let api = api_for(spawn_backend().await);

    let err = api.login(&Credentials::new("abc", "wrong")).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Rejected { status: 401, message: Some("Invalid Credentials".into()) }
    );
}

#[tokio::test]
async fn profile_save_returns_message() {
    let api = api_for(spawn_backend().await);
    let draft = ProfileDraft {
        username: "abc".into(),
        full_name: "Abc".into(),
        bio: String::new(),
        location: String::new(),
    };

    let reply = api.create_profile(&draft).await.unwrap();
    assert_eq!(reply.text(), Some("Profile saved!"));
}

#[tokio::test]
async fn chat_list_and_history() {
    let api = api_for(spawn_backend().await);

    let peers = api.chat_list("abc").await.unwrap();
    assert_eq!(peers.len(), 2);

    let history = api.messages("abc", "bob").await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].sender, "bob");
    assert_eq!(history[0].receiver, "abc");
}

#[tokio::test]
async fn send_message_ignores_non_json_body() {
    let api = api_for(spawn_backend().await);
    let message =
        OutgoingMessage { sender: "abc".into(), receiver: "bob".into(), text: "yo".into() };

    assert!(api.send_message(&message).await.is_ok());
}

#[tokio::test]
async fn send_message_failure_status_is_rejection() {
    let api = api_for(spawn_backend().await);
    let message =
        OutgoingMessage { sender: "abc".into(), receiver: "ghost".into(), text: "yo".into() };

    let err = api.send_message(&message).await.unwrap_err();
    assert_eq!(err, ApiError::Rejected { status: 502, message: None });
}

#[tokio::test]
async fn notifications_route_has_no_api_prefix() {
    let api = api_for(spawn_backend().await);

    let notifications = api.notifications("abc").await.unwrap();
    assert_eq!(notifications[0].message, "Welcome to Finstagram!");
}

#[tokio::test]
async fn unknown_route_is_rejected() {
    let api = api_for(spawn_backend().await);

    let err = api.posts().await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 404 | 405, .. }), "{err:?}");
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = api_for(addr);
    let err = api.chat_list("abc").await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
}
