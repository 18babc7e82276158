use chrono::NaiveDate;
use std::io::Write;
use trade_journal_core::errors::CoreError;
use trade_journal_core::models::dashboard::DashboardSummary;
use trade_journal_core::models::journal::Journal;
use trade_journal_core::models::record::{
    numeric, Deposit, FinancialRecord, PnlEntry, ProfitLoss, RecordKind, Withdrawal,
};
use trade_journal_core::models::settings::Settings;
use trade_journal_core::models::summary::{GroupedTotal, PeriodSummary};
use trade_journal_core::models::wallet::Wallet;
use trade_journal_core::models::window::{DateFilter, TimeWindow, WindowToken};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  WindowToken
// ═══════════════════════════════════════════════════════════════════

mod window_token {
    use super::*;

    #[test]
    fn parses_every_known_token() {
        assert_eq!(WindowToken::parse("1W"), WindowToken::OneWeek);
        assert_eq!(WindowToken::parse("1M"), WindowToken::OneMonth);
        assert_eq!(WindowToken::parse("6M"), WindowToken::SixMonths);
        assert_eq!(WindowToken::parse("1Y"), WindowToken::OneYear);
        assert_eq!(WindowToken::parse("5Y"), WindowToken::FiveYears);
    }

    #[test]
    fn day_counts() {
        let days: Vec<u64> = WindowToken::ALL.iter().map(|t| t.days()).collect();
        assert_eq!(days, vec![7, 30, 180, 365, 1825]);
    }

    #[test]
    fn unknown_token_falls_back_to_one_month() {
        for raw in ["", "3M", "YTD", "ALL", "1w ish", "🚀"] {
            assert_eq!(WindowToken::parse(raw), WindowToken::OneMonth, "token {raw:?}");
        }
    }

    #[test]
    fn parsing_ignores_case_and_whitespace() {
        assert_eq!(WindowToken::parse(" 1w "), WindowToken::OneWeek);
        assert_eq!(WindowToken::parse("5y"), WindowToken::FiveYears);
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for token in WindowToken::ALL {
            assert_eq!(WindowToken::parse(&token.to_string()), token);
        }
    }

    #[test]
    fn serializes_as_short_code() {
        let json = serde_json::to_string(&WindowToken::SixMonths).unwrap();
        assert_eq!(json, "\"6M\"");
    }

    #[test]
    fn deserializing_unknown_code_falls_back() {
        let token: WindowToken = serde_json::from_str("\"10Y\"").unwrap();
        assert_eq!(token, WindowToken::OneMonth);
    }

    #[test]
    fn default_is_one_month() {
        assert_eq!(WindowToken::default(), WindowToken::OneMonth);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  TimeWindow & DateFilter
// ═══════════════════════════════════════════════════════════════════

mod time_window {
    use super::*;

    #[test]
    fn new_keeps_ordered_bounds() {
        let w = TimeWindow::new(d(2025, 1, 1), d(2025, 1, 31));
        assert_eq!(w.start(), d(2025, 1, 1));
        assert_eq!(w.end(), d(2025, 1, 31));
    }

    #[test]
    fn new_swaps_reversed_bounds() {
        let w = TimeWindow::new(d(2025, 1, 31), d(2025, 1, 1));
        assert_eq!(w.start(), d(2025, 1, 1));
        assert_eq!(w.end(), d(2025, 1, 31));
    }

    #[test]
    fn trailing_subtracts_calendar_days() {
        let w = TimeWindow::trailing(d(2025, 3, 1), 30);
        assert_eq!(w.start(), d(2025, 1, 30));
        assert_eq!(w.end(), d(2025, 3, 1));
    }

    #[test]
    fn day_count_includes_both_ends() {
        assert_eq!(TimeWindow::trailing(d(2025, 1, 15), 7).day_count(), 8);
        assert_eq!(TimeWindow::single_day(d(2025, 1, 15)).day_count(), 1);
    }

    #[test]
    fn days_iterates_without_gaps() {
        let w = TimeWindow::new(d(2024, 2, 27), d(2024, 3, 2));
        let days: Vec<NaiveDate> = w.days().collect();
        assert_eq!(
            days,
            vec![
                d(2024, 2, 27),
                d(2024, 2, 28),
                d(2024, 2, 29),
                d(2024, 3, 1),
                d(2024, 3, 2)
            ]
        );
    }

    #[test]
    fn contains_is_inclusive() {
        let w = TimeWindow::new(d(2025, 1, 10), d(2025, 1, 20));
        assert!(w.contains(d(2025, 1, 10)));
        assert!(w.contains(d(2025, 1, 20)));
        assert!(!w.contains(d(2025, 1, 9)));
        assert!(!w.contains(d(2025, 1, 21)));
    }

    #[test]
    fn deserializing_reversed_bounds_swaps_them() {
        let w: TimeWindow =
            serde_json::from_str(r#"{"start":"2025-02-01","end":"2025-01-01"}"#).unwrap();
        assert_eq!(w.start(), d(2025, 1, 1));
        assert_eq!(w.end(), d(2025, 2, 1));
    }

    #[test]
    fn date_filter_matches() {
        let day = d(2025, 1, 15);
        assert!(DateFilter::All.matches(day));
        assert!(DateFilter::On(day).matches(day));
        assert!(!DateFilter::On(day).matches(d(2025, 1, 16)));
        let window = TimeWindow::new(d(2025, 1, 1), d(2025, 1, 15));
        assert!(DateFilter::from(window).matches(day));
        assert!(!DateFilter::from(window).matches(d(2025, 1, 16)));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Records
// ═══════════════════════════════════════════════════════════════════

mod records {
    use super::*;

    #[test]
    fn numeric_treats_missing_and_malformed_as_zero() {
        assert_eq!(numeric(Some(12.5)), 12.5);
        assert_eq!(numeric(None), 0.0);
        assert_eq!(numeric(Some(f64::NAN)), 0.0);
        assert_eq!(numeric(Some(f64::INFINITY)), 0.0);
    }

    #[test]
    fn pnl_entry_builder() {
        let e = PnlEntry::new("owner-1", 50.0, d(2025, 1, 15))
            .with_user("alice")
            .with_symbol("btcusdt")
            .with_split(Some(70.0), Some(20.0));
        assert_eq!(e.symbol.as_deref(), Some("BTCUSDT"));
        assert_eq!(e.user_key(), Some("alice"));
        assert_eq!(e.group_key(), Some("BTCUSDT"));
        assert_eq!(e.amount(), 50.0);
        assert_eq!(
            e.profit_loss(),
            Some(ProfitLoss {
                profit: Some(70.0),
                loss: Some(20.0)
            })
        );
    }

    #[test]
    fn blank_grouping_keys_count_as_missing() {
        let e = PnlEntry::new("owner-1", 1.0, d(2025, 1, 1)).with_user("   ");
        assert_eq!(e.user_key(), None);
        assert_eq!(e.group_key(), None);
    }

    #[test]
    fn deposits_group_by_label_and_have_no_split() {
        let dep = Deposit::new("owner-1", 100.0, d(2025, 1, 1)).with_label("salary");
        assert_eq!(dep.group_key(), Some("salary"));
        assert_eq!(dep.profit_loss(), None);

        let wd = Withdrawal::new("owner-1", 40.0, d(2025, 1, 2)).with_user("bob");
        assert_eq!(wd.user_key(), Some("bob"));
        assert_eq!(wd.profit_loss(), None);
    }

    #[test]
    fn missing_numeric_fields_deserialize_as_none() {
        let json = r#"{
            "id": "8d1b2c5e-8f6a-4f0e-9a52-3f1d2e4c5b6a",
            "owner_id": "owner-1",
            "occurred_at": "2025-01-15"
        }"#;
        let e: PnlEntry = serde_json::from_str(json).unwrap();
        assert_eq!(e.amount, None);
        assert_eq!(e.amount(), 0.0);
        assert_eq!(
            e.profit_loss(),
            Some(ProfitLoss {
                profit: None,
                loss: None
            })
        );
    }

    #[test]
    fn non_finite_split_values_are_dropped() {
        let e = PnlEntry::new("o", -5.0, d(2025, 1, 1)).with_split(Some(f64::NAN), Some(5.0));
        let split = e.profit_loss().unwrap();
        assert_eq!(split.profit, None);
        assert_eq!(split.loss, Some(5.0));
    }

    #[test]
    fn profit_loss_falls_back_to_sign_of_amount() {
        let empty = ProfitLoss::default();
        assert_eq!(empty.gain(30.0), 30.0);
        assert_eq!(empty.drawdown(30.0), 0.0);
        assert_eq!(empty.gain(-20.0), 0.0);
        assert_eq!(empty.drawdown(-20.0), 20.0);
    }

    #[test]
    fn explicit_loss_is_taken_as_magnitude() {
        let split = ProfitLoss {
            profit: None,
            loss: Some(-15.0),
        };
        assert_eq!(split.drawdown(100.0), 15.0);
        assert_eq!(split.gain(100.0), 100.0);
    }

    #[test]
    fn record_kind_display_and_path() {
        assert_eq!(RecordKind::Pnl.to_string(), "pnl");
        assert_eq!(RecordKind::Deposit.path_segment(), "deposits");
        assert_eq!(RecordKind::Withdrawal.path_segment(), "withdrawals");
        assert_eq!(RecordKind::Wallet.path_segment(), "wallets");
    }

    #[test]
    fn wallet_currency_is_uppercased() {
        let w = Wallet::new("owner-1", "Savings", 10.0, " eur ");
        assert_eq!(w.currency, "EUR");
    }

    #[test]
    fn journal_len_counts_every_kind() {
        let mut j = Journal::new();
        assert!(j.is_empty());
        j.pnl_entries.push(PnlEntry::new("o", 1.0, d(2025, 1, 1)));
        j.deposits.push(Deposit::new("o", 1.0, d(2025, 1, 1)));
        j.wallets.push(Wallet::new("o", "w", 1.0, "USD"));
        assert_eq!(j.len(), 3);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Summaries
// ═══════════════════════════════════════════════════════════════════

mod summaries {
    use super::*;

    #[test]
    fn grouped_total_add() {
        let mut g = GroupedTotal::default();
        g.add(10.0);
        g.add(-4.0);
        assert_eq!(g, GroupedTotal { sum: 6.0, count: 2 });
    }

    #[test]
    fn period_summary_derived_values() {
        let s = PeriodSummary {
            total_amount: 90.0,
            total_profit: 120.0,
            total_loss: 30.0,
            count: 3,
            ..PeriodSummary::default()
        };
        assert_eq!(s.average_amount(), 30.0);
        assert_eq!(s.net(), 90.0);
        assert_eq!(PeriodSummary::default().average_amount(), 0.0);
    }

    #[test]
    fn period_summary_serializes_camel_case() {
        let json = serde_json::to_value(PeriodSummary::default()).unwrap();
        for field in ["totalAmount", "totalProfit", "totalLoss", "count", "byUser", "bySymbol"] {
            assert!(json.get(field).is_some(), "missing {field}");
        }
    }

    #[test]
    fn dashboard_summary_serializes_camel_case() {
        let s = DashboardSummary {
            total_deposits: 1000.0,
            total_withdrawals: 200.0,
            total_trades: 3,
            total_profit: 150.0,
            total_loss: 50.0,
        };
        let json = serde_json::to_value(s).unwrap();
        assert_eq!(json["totalDeposits"], 1000.0);
        assert_eq!(json["totalWithdrawals"], 200.0);
        assert_eq!(json["totalTrades"], 3);
        assert_eq!(json["totalProfit"], 150.0);
        assert_eq!(json["totalLoss"], 50.0);
        assert_eq!(s.net_flow(), 800.0);
        assert_eq!(s.net_pnl(), 100.0);
        assert!(!s.is_zero());
        assert!(DashboardSummary::default().is_zero());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.display_currency, "USD");
        assert_eq!(s.default_window, WindowToken::OneMonth);
        assert_eq!(s.rate_for("USD"), Some(1.0));
        assert_eq!(s.record_api_url, None);
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let s = Settings::from_json(r#"{"default_window":"1W"}"#).unwrap();
        assert_eq!(s.default_window, WindowToken::OneWeek);
        assert_eq!(s.display_currency, "USD");
    }

    #[test]
    fn from_json_normalizes_currency_codes() {
        let s = Settings::from_json(
            r#"{"display_currency":"pln","exchange_rates":{"usd":4.0,"Eur":4.3}}"#,
        )
        .unwrap();
        assert_eq!(s.display_currency, "PLN");
        assert_eq!(s.rate_for("USD"), Some(4.0));
        assert_eq!(s.rate_for("eur"), Some(4.3));
        assert_eq!(s.rate_for("PLN"), Some(1.0));
        assert_eq!(s.rate_for("JPY"), None);
    }

    #[test]
    fn from_json_rejects_bad_rate() {
        let err = Settings::from_json(r#"{"exchange_rates":{"EUR":-1.0}}"#).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn from_json_rejects_bad_currency_code() {
        let err = Settings::from_json(r#"{"display_currency":"DOLLARS"}"#).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn from_json_rejects_malformed_json() {
        let err = Settings::from_json("{not json").unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn set_exchange_rate_validates() {
        let mut s = Settings::default();
        s.set_exchange_rate("eur", 1.1).unwrap();
        assert_eq!(s.rate_for("EUR"), Some(1.1));
        assert!(s.set_exchange_rate("EUR", 0.0).is_err());
        assert!(s.set_exchange_rate("EUR", f64::NAN).is_err());
        assert!(s.set_exchange_rate("E1", 1.0).is_err());
    }

    #[test]
    fn set_display_currency() {
        let mut s = Settings::default();
        s.set_display_currency("eur").unwrap();
        assert_eq!(s.display_currency, "EUR");
        assert_eq!(s.rate_for("EUR"), Some(1.0));
        assert!(s.set_display_currency("EURO").is_err());
    }

    #[test]
    fn json_roundtrip() {
        let mut s = Settings::default();
        s.default_window = WindowToken::FiveYears;
        s.record_api_url = Some("https://journal.example.com/api".into());
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"display_currency":"EUR","default_window":"1Y"}}"#).unwrap();
        let s = Settings::load_from_file(file.path()).unwrap();
        assert_eq!(s.display_currency, "EUR");
        assert_eq!(s.default_window, WindowToken::OneYear);
    }

    #[test]
    fn load_from_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load_from_file(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CoreError::FileIO(_)));
    }
}
