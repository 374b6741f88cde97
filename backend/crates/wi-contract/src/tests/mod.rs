mod latency;
