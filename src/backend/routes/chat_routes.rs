/**
 * Chat Route Configuration
 *
 * Chat log and presence endpoints, including the alias paths older clients
 * still call (`/chat/list`, `/chat/send`, `/chat/join`, ...).
 */

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::backend::chat::handlers::{clear_messages, list_messages, post_message};
use crate::backend::presence::handlers::{join, leave, list};
use crate::backend::server::state::AppState;

/// Configure chat-related routes
///
/// This function adds the following routes to the router:
/// - `GET /chat`, `GET /chat/list` - list messages
/// - `POST /chat`, `POST /chat/send` - post a message
/// - `DELETE /chat/clear`, `POST /chat/clear` - clear the log
/// - `POST /presence/join`, `POST /chat/join` - join
/// - `DELETE /presence/leave`, `POST /chat/leave` - leave
/// - `GET /presence/list`, `GET /chat/joiners` - current joiners
pub fn configure_chat_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/chat", get(list_messages).post(post_message))
        .route("/chat/list", get(list_messages))
        .route("/chat/send", post(post_message))
        .route("/chat/clear", delete(clear_messages).post(clear_messages))
        .route("/presence/join", post(join))
        .route("/chat/join", post(join))
        .route("/presence/leave", delete(leave))
        .route("/chat/leave", post(leave))
        .route("/presence/list", get(list))
        .route("/chat/joiners", get(list))
}
