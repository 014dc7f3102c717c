use anyhow::Result;
use dotenvy::dotenv;
use log::{info, warn};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{sleep, Duration};

use bandchat::api::ApiClient;
use bandchat::features::chat::ChatSession;
use bandchat::features::debate::{
    phase_label, status_label, DebateOrchestrator, DebateSetup, PRESET_TOPICS,
};
use bandchat::features::personas::{PersonaKey, PersonaRegistry};
use bandchat::Config;

const HELP: &str = "\
命令:
  /members          查看乐队成员
  /switch <key>     切换聊天对象 (tomori/anon/rana/soyo/taki)
  /clear            清空当前对话
  /agent on|off     切换 agent 模式 (工具 + 反思)
  /quotes           查看后端提供的成员语录
  /debate [1-3]     发起乐队讨论 (可选预设话题编号)
  /quit             退出";

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting band-chat CLI (backend {})", config.backend_url);

    let client = Arc::new(ApiClient::from_config(&config));

    match client.health().await {
        Ok(health) => info!("Backend healthy: {} ({})", health.service, health.status),
        Err(e) => warn!("Backend health check failed: {e}"),
    }

    let registry = PersonaRegistry::new();
    let mut current = PersonaKey::Tomori;
    let mut session = ChatSession::new(client.clone());
    let mut agent_mode = false;

    println!("🎸 MyGO!!!!! Chat — 迷子でもいい、迷子でも進め");
    print_roster(&registry);
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&registry, current);
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix('/') {
            let mut parts = rest.split_whitespace();
            match parts.next().unwrap_or("") {
                "quit" | "exit" => break,
                "help" => println!("{HELP}"),
                "members" => print_roster(&registry),
                "clear" => {
                    session.clear();
                    println!("对话已清空。");
                }
                "switch" => match parts.next().map(str::parse::<PersonaKey>) {
                    Some(Ok(key)) => {
                        current = key;
                        // Switching persona discards the transcript
                        session.clear();
                        if let Some(persona) = registry.get(key) {
                            println!("现在和 {} {} 聊天。", persona.avatar, persona.name);
                        }
                    }
                    _ => println!("用法: /switch <tomori|anon|rana|soyo|taki>"),
                },
                "agent" => match parts.next() {
                    Some("on") => {
                        agent_mode = true;
                        println!("agent 模式已开启。");
                    }
                    Some("off") => {
                        agent_mode = false;
                        println!("agent 模式已关闭。");
                    }
                    _ => println!("用法: /agent on|off"),
                },
                "quotes" => match client.philosophers().await {
                    Ok(personas) => {
                        for p in personas {
                            println!("{} ({})", p.name, p.key);
                            for quote in p.quotes {
                                println!("  「{quote}」");
                            }
                        }
                    }
                    Err(e) => println!("获取语录失败: {e}"),
                },
                "debate" => {
                    let setup = match parts.next() {
                        Some(raw) => match raw.parse::<usize>() {
                            Ok(n) if (1..=PRESET_TOPICS.len()).contains(&n) => {
                                DebateSetup::from_preset(&PRESET_TOPICS[n - 1])
                            }
                            _ => {
                                println!("用法: /debate [1-{}]", PRESET_TOPICS.len());
                                continue;
                            }
                        },
                        None => DebateSetup::default(),
                    };
                    watch_debate(client.clone(), &setup).await;
                }
                other => println!("未知命令 /{other}，输入 /help 查看帮助。"),
            }
            continue;
        }

        // Plain text: one chat turn with the current persona
        let result = if agent_mode {
            session
                .send_agent_message(line, current, true, true)
                .await
                .map(|reply| (reply.philosopher, reply.response, false))
        } else {
            session
                .send_message(line, current)
                .await
                .map(|reply| (reply.philosopher, reply.response, reply.critical_hit))
        };

        match result {
            // Attribution comes from the reply payload, not the local selection
            Ok((name, response, critical_hit)) => print_reply(&name, &response, critical_hit),
            Err(e) => {
                warn!("send failed: {e}");
                // The transcript already ends with the fallback reply
                if let Some(last) = session.messages().last() {
                    println!("{}", last.content);
                }
            }
        }
    }

    println!("再见！");
    Ok(())
}

fn prompt(registry: &PersonaRegistry, current: PersonaKey) {
    if let Some(persona) = registry.get(current) {
        print!("{} {} > ", persona.avatar, persona.name);
        let _ = std::io::stdout().flush();
    }
}

fn print_roster(registry: &PersonaRegistry) {
    println!("乐队成员:");
    for persona in registry.list() {
        println!(
            "  {} {} ({}) - {} - {}",
            persona.avatar, persona.name, persona.key, persona.role, persona.description
        );
    }
}

fn print_reply(name: &str, response: &str, critical_hit: bool) {
    if critical_hit {
        println!("{name}: {response}  [Critical Hit!]");
    } else {
        println!("{name}: {response}");
    }
}

/// Run one debate to a terminal state, printing records as snapshots arrive
async fn watch_debate(client: Arc<ApiClient>, setup: &DebateSetup) {
    println!("话题: {}", setup.topic);
    println!("正方: {:?}  反方: {:?}", setup.pro(), setup.con());

    let mut orchestrator = DebateOrchestrator::new(client);
    if orchestrator.start(setup).await.is_err() {
        if let Some(snap) = orchestrator.snapshot().await {
            println!(
                "讨论启动失败: {}",
                snap.error.as_deref().unwrap_or("未知错误")
            );
        }
        return;
    }

    let mut printed = 0;
    loop {
        sleep(Duration::from_millis(500)).await;

        let Some(snap) = orchestrator.snapshot().await else {
            continue;
        };

        for record in snap.records.iter().skip(printed) {
            println!(
                "[{}] {}: {}",
                phase_label(&record.phase),
                record.speaker_name,
                record.content
            );
        }
        printed = snap.records.len();

        if snap.status.is_terminal() {
            println!("讨论{}。", status_label(snap.status));
            if let Some(error) = snap.error {
                println!("错误: {error}");
            }
            return;
        }

        if !orchestrator.is_polling() {
            // A poll failed; what we have is the last known state
            println!("轮询中断，以上记录可能不完整。");
            return;
        }
    }
}
