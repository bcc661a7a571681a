#[cfg(feature = "metrics")]
pub struct Metrics {
    registry: prometheus::Registry,
}

#[cfg(feature = "metrics")]
impl Metrics {
    pub fn new() -> Self {
        Self {
            registry: prometheus::Registry::new(),
        }
    }

    pub fn int_counter(&self, name: &str, help: &str) -> anyhow::Result<prometheus::IntCounter> {
        let counter = prometheus::IntCounter::with_opts(prometheus::Opts::new(name, help))?;
        self.registry.register(Box::new(counter.clone()))?;
        Ok(counter)
    }

    pub fn int_counter_vec(
        &self,
        name: &str,
        help: &str,
        labels: &[&str],
    ) -> anyhow::Result<prometheus::IntCounterVec> {
        let counter = prometheus::IntCounterVec::new(prometheus::Opts::new(name, help), labels)?;
        self.registry.register(Box::new(counter.clone()))?;
        Ok(counter)
    }

    pub fn gather(&self) -> String {
        use prometheus::Encoder;

        let encoder = prometheus::TextEncoder::new();
        let mf = self.registry.gather();
        let mut buf = Vec::new();
        let _ = encoder.encode(&mf, &mut buf);
        String::from_utf8_lossy(&buf).to_string()
    }
}

#[cfg(feature = "metrics")]
impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(feature = "metrics"))]
pub struct Metrics;

#[cfg(not(feature = "metrics"))]
impl Metrics {
    pub fn new() -> Self {
        Metrics
    }

    pub fn gather(&self) -> String {
        String::new()
    }
}

#[cfg(not(feature = "metrics"))]
impl Default for Metrics {
    fn default() -> Self {
        Metrics
    }
}
