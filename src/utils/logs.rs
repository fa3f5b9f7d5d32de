pub fn setup_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // keep stdout for command output.
        .with_writer(std::io::stderr)
        // disable printing the name of the module in every log line.
        .with_target(false);
    if json {
        builder.with_ansi(false).json().init();
    } else {
        builder.init();
    }
}
