// ==========================================
// 每日标本挑选系统 - 命令行入口
// ==========================================
// 用法:
//   even-sampling <history> <cases> <candidates> <config.json>
// 输出:
//   stdout: 候选表 + to_pick 列 (CSV)
//   stderr: 地域均衡诊断日志
// ==========================================

use anyhow::{bail, Context, Result};
use even_sampling::importer::{write_picks_csv, RecordLoader, UniversalFileParser};
use even_sampling::{logging, SamplerConfig, SpecimenPicker};

fn main() -> Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 4 {
        bail!("用法: even-sampling <history> <cases> <candidates> <config.json>");
    }

    tracing::info!("{} v{}", even_sampling::APP_NAME, even_sampling::VERSION);

    let parser = UniversalFileParser;
    let loader = RecordLoader::new();

    let history = loader
        .load_history(&parser.parse(&args[0]).with_context(|| format!("读取历史表失败: {}", args[0]))?)
        .context("历史表格式错误")?;
    let cases = loader
        .load_cases(&parser.parse(&args[1]).with_context(|| format!("读取病例表失败: {}", args[1]))?)
        .context("病例表格式错误")?;
    let candidates = loader
        .load_candidates(&parser.parse(&args[2]).with_context(|| format!("读取候选表失败: {}", args[2]))?)
        .context("候选表格式错误")?;
    let config = SamplerConfig::from_json_file(&args[3])
        .with_context(|| format!("读取配置失败: {}", args[3]))?;

    let picker = SpecimenPicker::new(history, cases, config)?;
    let result = picker.make_picks(&candidates.specimens)?.into_result()?;

    let stdout = std::io::stdout();
    write_picks_csv(stdout.lock(), &candidates, &result).context("写出挑选结果失败")?;

    tracing::info!(run_id = %result.run_id, status = %result.status, "挑选完成");
    Ok(())
}
