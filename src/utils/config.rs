#![forbid(unsafe_code)]

use anyhow::{Result, anyhow};
use log::{info, error, LevelFilter};
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use serde::Deserialize;
use std::{env, fs, path::Path};
use structopt::StructOpt;

// Server Utilities
use crate::utils::{hx_utils::get_absolute_path, errors::Errors};

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Directory and file locations. Unless otherwise noted, all files and directories
// are relative to the root directory.
const ENV_HXDEMO_ROOT_DIR  : &str = "HXDEMO_ROOT_DIR";
const DEFAULT_ROOT_DIR     : &str = "~/.hxdemo";
const CONFIG_DIR           : &str = "/config";
const LOGS_DIR             : &str = "/logs";
const LOG4RS_CONFIG_FILE   : &str = "/log4rs.yml";  // relative to config dir
const HXDEMO_CONFIG_FILE   : &str = "/hxdemo.toml"; // relative to config dir
const LOG_FILE             : &str = "/hxdemo.log";  // relative to logs dir

// Networking.
const DEFAULT_HTTP_ADDR    : &str = "http://localhost";
const DEFAULT_HTTP_PORT    : u16  = 3000;

// Static assets served at the site root.
const DEFAULT_STATIC_DIR   : &str = "./public";

// Used when no log4rs configuration file exists.
const DEFAULT_LOG_PATTERN  : &str = "{d(%Y-%m-%dT%H:%M:%S%.3f)} {h({l})} {t} - {m}{n}";

// ***************************************************************************
//                             Directory Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// HxDirs:
// ---------------------------------------------------------------------------
#[derive(Debug, Clone)]
pub struct HxDirs {
    pub root_dir: String,
    pub config_dir: String,
    pub logs_dir: String,
}

// ***************************************************************************
//                               Config Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// HxArgs:
// ---------------------------------------------------------------------------
#[derive(Debug, StructOpt)]
#[structopt(name = "hxdemo_args", about = "Command line arguments for the hxdemo server.")]
pub struct HxArgs {
    /// Specify the server's root data directory.
    ///
    /// This directory contains the configuration and log files.
    #[structopt(short, long)]
    pub root_dir: Option<String>,

    /// Create the data directories and then exit.
    ///
    /// The data directories will be rooted at a root directory calculated
    /// using the following priority order:
    ///
    ///   1. If set, the value of the HXDEMO_ROOT_DIR environment,
    ///
    ///   2. Otherwise, if set, the value of the --root_dir command line argument,
    ///
    ///   3. Otherwise, ~/.hxdemo
    ///
    #[structopt(short, long)]
    pub create_dirs_only: bool,
}

// ---------------------------------------------------------------------------
// Parms:
// ---------------------------------------------------------------------------
#[derive(Debug)]
#[allow(dead_code)]
pub struct Parms {
    pub config_file: String,
    pub config: Config,
}

// ---------------------------------------------------------------------------
// RuntimeCtx:
// ---------------------------------------------------------------------------
#[derive(Debug)]
#[allow(dead_code)]
pub struct RuntimeCtx {
    pub parms: Parms,
    pub hx_args: HxArgs,
    pub hx_dirs: HxDirs,
}

// ---------------------------------------------------------------------------
// Config:
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub http_addr: String,
    pub http_port: u16,
    pub static_dir: String,
    pub seed: bool,
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "hxdemo Server".to_string(),
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            static_dir: DEFAULT_STATIC_DIR.to_string(),
            seed: true,
        }
    }
}

// ***************************************************************************
//                            Directory Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_hx_dirs:
// ---------------------------------------------------------------------------
/** Calculate the external data directories and create any that are missing. */
pub fn init_hx_dirs(args: &HxArgs) -> Result<HxDirs> {
    let root_dir = get_root_dir(args);
    check_hx_dir(&root_dir, "root directory")?;

    let config_dir = root_dir.clone() + CONFIG_DIR;
    check_hx_dir(&config_dir, "config directory")?;

    let logs_dir = root_dir.clone() + LOGS_DIR;
    check_hx_dir(&logs_dir, "logs directory")?;

    Ok(HxDirs {root_dir, config_dir, logs_dir})
}

// ---------------------------------------------------------------------------
// check_hx_dir:
// ---------------------------------------------------------------------------
/** Check that the path is absolute and, if it exists, that it is a directory.
 * If it doesn't exist, create it.
 */
fn check_hx_dir(dir: &str, msgname: &str) -> Result<()> {
    let path = Path::new(dir);
    if !path.is_absolute() {
        return Err(anyhow!("The hxdemo {} path must be absolute: {}", msgname, dir));
    }
    if path.exists() {
        if !path.is_dir() {
            return Err(anyhow!("The hxdemo {} path must be a directory: {}", msgname, dir));
        }
    } else {
        fs::create_dir_all(path).map_err(Errors::IOError)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// get_root_dir:
// ---------------------------------------------------------------------------
fn get_root_dir(args: &HxArgs) -> String {
    // Order of precedence:
    //  1. Environment variable
    //  2. Command line --root-dir argument
    //  3. Default location
    //
    let root_dir = env::var(ENV_HXDEMO_ROOT_DIR).unwrap_or_else(
        |_| {
            match args.root_dir.clone() {
                Some(r) => r,
                None => DEFAULT_ROOT_DIR.to_string(),
            }
        });

    // Canonicalize the path.
    get_absolute_path(&root_dir)
}

// ***************************************************************************
//                               Log Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_log:
// ---------------------------------------------------------------------------
/** Initialize log4rs from the configuration directory's log4rs.yml.  Without
 * that file, log at info level to the console and to hxdemo.log in the logs
 * directory.
 */
pub fn init_log(dirs: &HxDirs) -> Result<()> {
    let logconfig = dirs.config_dir.clone() + LOG4RS_CONFIG_FILE;
    if Path::new(&logconfig).exists() {
        if let Err(e) = log4rs::init_file(&logconfig, Default::default()) {
            println!("{}", e);
            return Err(anyhow!(Errors::Log4rsInitialization(logconfig)));
        }
        info!("Log4rs initialized using: {}", logconfig);
        return Ok(());
    }

    let logfile = get_log_file(dirs);
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(DEFAULT_LOG_PATTERN)))
        .build();
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(DEFAULT_LOG_PATTERN)))
        .build(&logfile)
        .map_err(Errors::IOError)?;
    let config = LogConfig::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .appender(Appender::builder().build("file", Box::new(file)))
        .build(Root::builder().appender("stdout").appender("file").build(LevelFilter::Info))
        .map_err(|e| anyhow!(e.to_string()))?;
    log4rs::init_config(config)?;
    info!("Log4rs initialized with defaults writing to {}, no file at: {}", logfile, logconfig);
    Ok(())
}

/// The log file used when no log4rs.yml is configured.
pub fn get_log_file(dirs: &HxDirs) -> String {
    dirs.logs_dir.clone() + LOG_FILE
}

// ***************************************************************************
//                             Parms Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_parms:
// ---------------------------------------------------------------------------
/** Retrieve the application parameters from the configuration file in the
 * config directory.  A missing file means default values are used.
 */
fn get_parms(dirs: &HxDirs) -> Result<Parms> {
    let config_file = get_absolute_path(&(dirs.config_dir.clone() + HXDEMO_CONFIG_FILE));
    info!("{}", Errors::ReadingConfigFile(config_file.clone()));
    let contents = match fs::read_to_string(&config_file) {
        Ok(c) => c,
        Err(_) => {
            info!("Unable to read configuration at {}. Using default values.", config_file);
            return Ok(Parms { config_file: Default::default(), config: Config::new() });
        }
    };

    let config = parse_config(&contents).map_err(|e| {
        let msg = format!("{}\n   {}", Errors::TOMLParseError(config_file.clone()), e);
        error!("{}", msg);
        anyhow!(msg)
    })?;

    Ok(Parms { config_file, config })
}

/// Parse the toml configuration text.  Absent keys take their default values.
pub fn parse_config(contents: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(contents)
}

// ***************************************************************************
//                             Config Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_runtime_context:
// ---------------------------------------------------------------------------
/** Read the command line, prepare the data directories, start logging and
 * load the configuration.  Logging is up before the configuration is read so
 * that parse problems are recorded.
 */
pub fn init_runtime_context() -> Result<RuntimeCtx> {
    let hx_args = HxArgs::from_args();
    let hx_dirs = init_hx_dirs(&hx_args)?;
    if hx_args.create_dirs_only {
        return Ok(RuntimeCtx {parms: Parms {config_file: Default::default(), config: Config::new()},
                              hx_args, hx_dirs});
    }
    init_log(&hx_dirs)?;
    let parms = get_parms(&hx_dirs)?;
    Ok(RuntimeCtx {parms, hx_args, hx_dirs})
}
