use codec_bench::{init_tracing, BenchConfig, BenchContext, BenchmarkRunner, ReportSink};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = BenchConfig::default();
    config.validate()?;

    let sink = ReportSink::open(&config.log_path())?;
    init_tracing(&sink, &config.log_filter)?;

    let context = BenchContext::init(config, sink)?;
    BenchmarkRunner::new(context).run()?;
    Ok(())
}
