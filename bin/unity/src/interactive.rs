/* This file is part of ProfitUnity DAO
 *
 * Copyright (C) 2022-2026 ProfitUnity developers
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::{io::ErrorKind, str::FromStr, time::Duration};

use libc::{fcntl, F_GETFL, F_SETFL, O_NONBLOCK};
use linenoise_rs::{
    linenoise_history_add, linenoise_history_load, linenoise_history_save,
    linenoise_set_completion_callback, linenoise_set_hints_callback, LinenoiseState,
};
use num_bigint::BigUint;
use smol::Timer;

use profitunity::{
    cli_desc,
    dao::Vote,
    ui::{render::render, Tab, ViewController},
    util::{path::expand_path, time::Timestamp},
    Result,
};

const COMMANDS: [&str; 8] =
    ["help", "create", "view", "propose", "vote", "execute", "refresh", "quit"];

/// Auxiliary function to print the help message.
fn help() {
    println!("{}", cli_desc!());
    println!("Commands:");
    println!("\thelp: Prints the help message");
    println!("\tcreate: Switch to the Create Proposal tab");
    println!("\tview: Switch to the View Proposals tab and fetch all proposals");
    println!("\tpropose <token-id>: Create a proposal to buy the given fake NFT");
    println!("\tvote <id> <yay|nay>: Vote on an open proposal");
    println!("\texecute <id>: Execute a proposal whose deadline has passed");
    println!("\trefresh: Reconnect if needed and reload balances and proposals");
    println!("\tquit: Leave the shell");
}

/// Auxiliary function to define the interactive shell completions.
fn completion(buf: &str, lc: &mut Vec<String>) {
    if buf.is_empty() {
        return
    }

    // `vote <id> ` completes to the two vote words
    let parts: Vec<&str> = buf.split(' ').collect();
    if parts.len() == 3 && parts[0] == "vote" {
        for word in ["yay", "nay"] {
            if word.starts_with(&parts[2].to_lowercase()) {
                lc.push(format!("{} {} {}", parts[0], parts[1], word));
            }
        }
        return
    }

    for cmd in COMMANDS {
        if cmd.starts_with(buf) {
            lc.push(cmd.to_string());
        }
    }
}

/// Auxiliary function to define the interactive shell hints.
fn hints(buf: &str) -> Option<(String, i32, bool)> {
    match buf {
        "propose " => Some(("{token-id}".to_string(), 35, false)), // 35 = magenta
        "vote " => Some(("{id} {yay|nay}".to_string(), 35, false)),
        "execute " => Some(("{id}".to_string(), 35, false)),
        _ => None,
    }
}

fn unrecognized(cmd: &str) -> String {
    format!("Unrecognized command: {cmd}, type \"help\" for the list")
}

/// Run the shell over the given controller until `quit`, Ctrl-D or Ctrl-C.
/// Only sane/linenoise terminals are supported.
pub async fn interactive(ctl: &mut ViewController, history_path: &str) {
    // Expand the history file path
    let history_path = match expand_path(history_path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error while expanding history file path: {e}");
            return
        }
    };
    let history_file = history_path.to_string_lossy().to_string();

    linenoise_set_completion_callback(completion);
    linenoise_set_hints_callback(hints);
    let _ = linenoise_history_load(&history_file);

    if let Err(e) = ctl.mount().await {
        println!("Error while connecting wallet: {e}");
    }
    println!("{}", render(ctl.state(), Timestamp::current_time()));

    loop {
        // Grab input or end if Ctrl-D or Ctrl-C was pressed
        let Some(line) = listen_for_line().await else { break };

        if line.is_empty() {
            continue
        }

        linenoise_history_add(&line);

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue
        }

        let res = match parts[0] {
            "help" => {
                help();
                continue
            }
            "quit" | "exit" => break,
            "create" => ctl.select_tab(Tab::Create).await,
            "view" => ctl.select_tab(Tab::View).await,
            "refresh" => ctl.refresh().await,
            "propose" => handle_propose(ctl, &parts).await,
            "vote" => handle_vote(ctl, &parts).await,
            "execute" => handle_execute(ctl, &parts).await,
            _ => {
                println!("{}", unrecognized(parts[0]));
                continue
            }
        };

        if let Err(e) = res {
            println!("Error: {e}");
        }

        println!("{}", render(ctl.state(), Timestamp::current_time()));
        ctl.dismiss_alert();
    }

    let _ = linenoise_history_save(&history_file);
}

/// Auxiliary function to read a line with stdin in non-blocking mode,
/// so the executor keeps running while the user types.
async fn listen_for_line() -> Option<String> {
    let mut state = match LinenoiseState::edit_start(-1, -1, "unity> ") {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error while generating linenoise state: {e}");
            return None
        }
    };

    // Set stdin to non-blocking mode
    let fd = state.get_fd();
    unsafe {
        let flags = fcntl(fd, F_GETFL, 0);
        fcntl(fd, F_SETFL, flags | O_NONBLOCK);
    }

    let mut line = None;
    loop {
        match state.edit_feed() {
            Ok(Some(l)) => {
                line = Some(l);
                break
            }
            Ok(None) => break,
            Err(e) if e.kind() == ErrorKind::Interrupted => break,
            Err(e) if e.kind() == ErrorKind::WouldBlock => {
                // No data available, yield and retry
                Timer::after(Duration::from_millis(10)).await;
            }
            Err(e) => {
                eprintln!("Error while reading linenoise feed: {e}");
                break
            }
        }
    }

    // Restore blocking mode
    unsafe {
        let flags = fcntl(fd, F_GETFL, 0);
        fcntl(fd, F_SETFL, flags & !O_NONBLOCK);
    }

    let _ = state.edit_stop();
    line
}

async fn handle_propose(ctl: &mut ViewController, parts: &[&str]) -> Result<()> {
    if parts.len() != 2 {
        println!("Malformed `propose` command");
        println!("Usage: propose <token-id>");
        return Ok(())
    }

    let token_id = BigUint::from_str(parts[1])?;
    ctl.select_tab(Tab::Create).await?;
    let receipt = ctl.create_proposal(token_id).await?;
    println!("Proposal created in transaction {}", receipt.transaction_hash);
    Ok(())
}

async fn handle_vote(ctl: &mut ViewController, parts: &[&str]) -> Result<()> {
    if parts.len() != 3 {
        println!("Malformed `vote` command");
        println!("Usage: vote <id> <yay|nay>");
        return Ok(())
    }

    let id = u64::from_str(parts[1])?;
    let vote = Vote::from_str(parts[2])?;
    if ctl.state().proposals.get(id).is_none() {
        ctl.select_tab(Tab::View).await?;
    }
    let receipt = ctl.vote(id, vote).await?;
    println!("Voted {} on proposal {} in transaction {}", vote, id, receipt.transaction_hash);
    Ok(())
}

async fn handle_execute(ctl: &mut ViewController, parts: &[&str]) -> Result<()> {
    if parts.len() != 2 {
        println!("Malformed `execute` command");
        println!("Usage: execute <id>");
        return Ok(())
    }

    let id = u64::from_str(parts[1])?;
    if ctl.state().proposals.get(id).is_none() {
        ctl.select_tab(Tab::View).await?;
    }
    let receipt = ctl.execute(id).await?;
    println!("Executed proposal {} in transaction {}", id, receipt.transaction_hash);
    Ok(())
}
