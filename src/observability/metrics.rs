use prometheus::{Encoder, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub bookings_total: IntCounterVec,
    pub otp_verifications_total: IntCounterVec,
    pub vehicles_available: IntGauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let bookings_total = IntCounterVec::new(
            Opts::new("bookings_total", "Booking writes by target status"),
            &["status"],
        )
        .expect("valid bookings_total metric");

        let otp_verifications_total = IntCounterVec::new(
            Opts::new(
                "otp_verifications_total",
                "OTP verification attempts by outcome",
            ),
            &["outcome"],
        )
        .expect("valid otp_verifications_total metric");

        let vehicles_available =
            IntGauge::new("vehicles_available", "Vehicles currently bookable")
                .expect("valid vehicles_available metric");

        registry
            .register(Box::new(bookings_total.clone()))
            .expect("register bookings_total");
        registry
            .register(Box::new(otp_verifications_total.clone()))
            .expect("register otp_verifications_total");
        registry
            .register(Box::new(vehicles_available.clone()))
            .expect("register vehicles_available");

        Self {
            registry,
            bookings_total,
            otp_verifications_total,
            vehicles_available,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}
