//! Transcript fixtures and data-root builders shared by the integration tests.
#![allow(dead_code)]

use std::fs::{create_dir_all, write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const TOURNAMENT_FILE: &str = "20141116_Double or Nothing(100679030)_real_holdem_no-limit.txt";
pub const CASH_FILE: &str = "20141101_Frankfurt 11_real_holdem_no-limit.txt";

/// A four-street tournament hand ending at showdown.
pub const TOURNAMENT_HAND: &str = "\
Winamax Poker - Tournament \"Double or Nothing\" buyIn: 10+1 level: 3 - HandId: #123-4-5 - Holdem no limit (100/200) - 2014/11/16 20:00:00 UTC
Table: 'Double or Nothing(100679030)#002' 6-max (real money) Seat #3 is the button
Seat 1: Alice (4800)
Seat 2: Bob (5200)
Seat 3: Hero (5000)
*** ANTE/BLINDS ***
Alice posts ante 25
Bob posts ante 25
Hero posts ante 25
Alice posts small blind 100
Bob posts big blind 200
Dealt to Hero [Qs Qh]
*** PRE-FLOP ***
Hero raises 200 to 400
Alice folds
Bob calls 200
*** FLOP *** [2d 7c Ks]
Bob checks
Hero bets 500
Bob calls 500
*** TURN *** [2d 7c Ks][4h]
Bob checks
Hero checks
*** RIVER *** [2d 7c Ks 4h][9s]
Bob bets 1000
Hero calls 1000
*** SHOW DOWN ***
Bob shows [Kd Jc] (One pair : Kings)
Hero shows [Qs Qh] (One pair : Queens)
Bob collected 3875 from pot
*** SUMMARY ***
Total pot 3875 | No rake
Board: [2d 7c Ks 4h 9s]
Seat 2: Bob (big blind) showed [Kd Jc] and won 3875 with One pair : Kings

";

/// A cash hand where the hero folds before any street marker.
pub const BARE_FOLD_HAND: &str = "\
Winamax Poker - CashGame - HandId: #7-1-1 - Holdem no limit (0.01€/0.02€) - 2014/11/01 21:24:02 UTC
Table: 'Frankfurt 11' 6-max (real money) Seat #1 is the button
Seat 1: Hero (2€)
Seat 2: Villain (2€)
Hero folds
Villain collected 0.03€ from pot
";

/// One complete cash hand at `table`, won by `winner` without a contest.
pub fn cash_hand(table: &str, hand_id: &str, winner: &str, loser: &str) -> String {
    format!(
        "Winamax Poker - CashGame - HandId: #{hand_id} - Holdem no limit (0.01€/0.02€) - 2014/11/01 21:24:02 UTC\n\
         Table: '{table}' 6-max (real money) Seat #1 is the button\n\
         Seat 1: {loser} (2€)\n\
         Seat 2: {winner} (2€)\n\
         *** ANTE/BLINDS ***\n\
         {loser} posts small blind 0.01€\n\
         {winner} posts big blind 0.02€\n\
         *** PRE-FLOP ***\n\
         {loser} folds\n\
         {winner} collected 0.03€ from pot\n\
         *** SUMMARY ***\n\
         Total pot 0.03€ | No rake\n\
         Seat 2: {winner} won 0.03€\n\n"
    )
}

pub fn cash_file_name(table: &str) -> String {
    format!("20141101_{table}_real_holdem_no-limit.txt")
}

/// A data root with the layout the client writes, without any hand history.
pub struct DataRoot {
    dir: TempDir,
}

impl DataRoot {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        create_dir_all(dir.path().join("history")).expect("history dir");
        create_dir_all(dir.path().join("data/buddy")).expect("buddy dir");
        create_dir_all(dir.path().join("data/players")).expect("players dir");
        let root = Self { dir };
        root.add_history_file("hero_winamax_positioning_file.dat", "");
        root.add_history_file(
            "20141116_Double or Nothing(100679030)_real_holdem_no-limit_summary.txt",
            "Winamax Poker - Tournament summary : Double or Nothing(100679030)\n",
        );
        root
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn add_history_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join("history").join(name);
        write(&path, content).expect("write history file");
        path
    }

    /// Adds `count` cash game files, one hand each, all at distinct tables.
    pub fn with_cash_tables(self, count: usize) -> Self {
        for i in 0..count {
            let table = format!("Table {i:02}");
            self.add_history_file(
                &cash_file_name(&table),
                &cash_hand(&table, &format!("{i}-1-1"), "Hero", "Villain"),
            );
        }
        self
    }
}
