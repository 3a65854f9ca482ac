#[cfg(test)]
mod long {
    use crate::*;

    #[test]
    fn ambiguous_prefix() {
        let mut verbose = false;
        let mut version = false;
        let mut fs = FlagSet::new();
        fs.add_bool(&mut verbose, 'v', "verbose", "").expect("verbose");
        fs.add_bool(&mut version, 'V', "version", "").expect("version");

        match fs.parse(string_vec!("argv[0]", "--ver")) {
            Err(Error::AmbiguousOption { opt, candidates }) => {
                assert_eq!(opt, Opt::Long("ver".to_string()));
                assert_eq!(candidates, string_vec!("verbose", "version"));
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }
    }

    #[test]
    fn unique_prefix() {
        let mut verbose = false;
        let mut version = false;
        let mut fs = FlagSet::new();
        fs.add_bool(&mut verbose, 'v', "verbose", "").expect("verbose");
        fs.add_bool(&mut version, 'V', "version", "").expect("version");
        fs.parse(string_vec!("argv[0]", "--verb")).expect("parse");
        drop(fs);

        assert!(verbose);
        assert!(!version);
    }

    #[test]
    fn exact_match_wins() {
        let mut short = false;
        let mut long = false;
        let mut fs = FlagSet::new();
        fs.add_bool(&mut long, '\0', "verbose-log", "").expect("verbose-log");
        fs.add_bool(&mut short, '\0', "verbose", "").expect("verbose");
        fs.parse(string_vec!("argv[0]", "--verbose")).expect("parse");
        drop(fs);

        assert!(short);
        assert!(!long);
    }

    #[test]
    fn forced_and_separate_values() {
        for argv in vec![
            string_vec!("argv[0]", "--count=5"),
            string_vec!("argv[0]", "--count", "5"),
            string_vec!("argv[0]", "--co", "5"),
        ] {
            let mut count: i64 = -1;
            let mut fs = FlagSet::new();
            fs.add_int64(&mut count, 'c', "count", Some("NUM"), "").expect("count");
            let n = fs.parse(argv).expect("parse");
            assert_eq!(n, 0);
            drop(fs);
            assert_eq!(count, 5);
        }
    }

    #[test]
    fn empty_forced_value() {
        let mut count: i32 = 0;
        let mut fs = FlagSet::new();
        fs.add_int(&mut count, 'c', "count", None, "").expect("count");

        let err = fs.parse(string_vec!("argv[0]", "--count=")).expect_err("should fail");
        assert_eq!(err, Error::NeedArgument(Opt::Long("count".to_string())));
    }

    #[test]
    fn forced_value_keeps_following_token() {
        let mut name = String::new();
        let mut fs = FlagSet::new();
        fs.add_string(&mut name, '\0', "name", None, "").expect("name");
        let n = fs.parse(string_vec!("argv[0]", "--name=web", "image")).expect("parse");

        assert_eq!(n, 1);
        assert_eq!(fs.args(), &string_vec!("image")[..]);
        drop(fs);
        assert_eq!(name, "web");
    }

    #[test]
    fn value_may_contain_equals() {
        let mut header = String::new();
        let mut fs = FlagSet::new();
        fs.add_string(&mut header, '\0', "header", None, "").expect("header");
        fs.parse(string_vec!("argv[0]", "--header=X-Key=a=b")).expect("parse");
        drop(fs);

        assert_eq!(header, "X-Key=a=b");
    }

    #[test]
    fn argument_forced_on_bool() {
        let mut quiet = false;
        let mut fs = FlagSet::new();
        fs.add_bool(&mut quiet, 'q', "quiet", "").expect("quiet");

        let err = fs.parse(string_vec!("argv[0]", "--qui=yes")).expect_err("should fail");
        assert_eq!(err, Error::ArgumentForced(Opt::Long("quiet".to_string())));
        drop(fs);
        assert!(!quiet, "value parser must not run for a forced argument");
    }

    #[test]
    fn bool_leaves_next_token() {
        let mut quiet = false;
        let mut fs = FlagSet::new();
        fs.add_bool(&mut quiet, 'q', "quiet", "").expect("quiet");
        let n = fs.parse(string_vec!("argv[0]", "--quiet", "host")).expect("parse");

        assert_eq!(n, 1);
        assert_eq!(fs.args(), &string_vec!("host")[..]);
    }

    #[test]
    fn optional_value_declines_next_token() {
        let mut level: Option<String> = None;
        let mut fs = FlagSet::new();
        fs.add_func(
            |arg: Option<&str>, _| match arg {
                Some(a) if a.starts_with("lvl") => {
                    level = Some(a.to_string());
                    Parsed::Consumed
                }
                _ => Parsed::ConsumedNoArg,
            },
            '\0',
            "color",
            Some("WHEN"),
            "",
        )
        .expect("color");

        let n = fs.parse(string_vec!("argv[0]", "--color", "file")).expect("parse");
        assert_eq!(n, 1);
        assert_eq!(fs.args(), &string_vec!("file")[..]);
        drop(fs);
        assert_eq!(level, None);
    }

    #[test]
    fn optional_value_rejects_forced() {
        let mut fs = FlagSet::new();
        fs.add_func(|_, _| Parsed::ConsumedNoArg, '\0', "color", Some("WHEN"), "")
            .expect("color");

        let err = fs.parse(string_vec!("argv[0]", "--color=never")).expect_err("should fail");
        assert_eq!(err, Error::ArgumentForced(Opt::Long("color".to_string())));
    }

    #[test]
    fn empty_forced_value_on_optional() {
        let mut when: Option<String> = None;
        let mut fs = FlagSet::new();
        fs.add_func(
            |arg: Option<&str>, _| match arg {
                None | Some("") => Parsed::ConsumedNoArg,
                Some(a) => {
                    when = Some(a.to_string());
                    Parsed::Consumed
                }
            },
            '\0',
            "color",
            Some("WHEN"),
            "",
        )
        .expect("color");

        let n = fs.parse(string_vec!("argv[0]", "--color=", "file")).expect("parse");
        assert_eq!(n, 1);
        assert_eq!(fs.args(), &string_vec!("file")[..]);
        drop(fs);
        assert_eq!(when, None);
    }

    #[test]
    fn empty_long_name() {
        for argv in vec![
            string_vec!("argv[0]", "--=x"),
            string_vec!("argv[0]", "--="),
        ] {
            let mut count: i32 = 0;
            let mut verbose = false;
            let mut fs = FlagSet::new();
            fs.add_int(&mut count, 'n', "", None, "").expect("n");
            fs.add_bool(&mut verbose, 'v', "verbose", "").expect("verbose");

            let err = fs.parse(argv).expect_err("should fail");
            assert_eq!(err, Error::UnknownOption(Opt::Long(String::new())));
        }
    }

    #[test]
    fn help_rejects_forced() {
        let mut fs = FlagSet::new();
        let err = fs.parse(string_vec!("argv[0]", "--help=foo")).expect_err("should fail");
        assert_eq!(err, Error::ArgumentForced(Opt::Long("help".to_string())));
        assert!(fs.lookup_long("help").is_none());
    }

    #[test]
    fn unknown_long() {
        let mut quiet = false;
        let mut fs = FlagSet::new();
        fs.add_bool(&mut quiet, 'q', "quiet", "").expect("quiet");

        let err = fs.parse(string_vec!("argv[0]", "--loud=1")).expect_err("should fail");
        assert_eq!(err, Error::UnknownOption(Opt::Long("loud".to_string())));
    }

    #[test]
    fn missing_value_reports_full_name() {
        let mut tries: i32 = 20;
        let mut fs = FlagSet::new();
        fs.add_int(&mut tries, 't', "tries", None, "").expect("tries");

        let err = fs.parse(string_vec!("argv[0]", "--tr")).expect_err("should fail");
        assert_eq!(err, Error::NeedArgument(Opt::Long("tries".to_string())));
        assert_eq!(
            diagnostic(fs.prog_name(), &err),
            "argv[0]: option requires an argument '--tries'\n\
             Try 'argv[0] --help' for more information."
        );
    }
}
