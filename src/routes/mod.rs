pub(crate) mod otp_routes;
