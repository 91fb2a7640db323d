use axum::{routing::post, Router};

use crate::{handlers::otp, state::AppState};

pub fn otp_routes() -> Router<AppState> {
    Router::new()
        // Request an OTP (email delivery, stateless token back)
        .route("/auth/send-otp", post(otp::send_otp).get(otp::send_otp_query))
        // Verify a (token, otp) pair
        .route(
            "/auth/verify-otp",
            post(otp::verify_otp).get(otp::verify_otp_query),
        )
}
