use cookie::{Cookie, CookieJar};

// return empty cookie jar for unparsable cookies
#[must_use]
pub fn parse_cookies_to_jar(s: &str) -> CookieJar {
    let cookie_str = s.trim().to_owned();
    let mut jar = CookieJar::new();
    let cookies = Cookie::split_parse(cookie_str).filter_map(Result::ok);

    for cookie in cookies {
        jar.add_original(cookie);
    }

    jar
}

/// Value of the named cookie, treating an empty value as absent.
#[must_use]
pub fn cookie_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(Cookie::value)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookies_to_jar() {
        let header_value = "c1=v1; c2=v2";
        let jar = parse_cookies_to_jar(header_value);

        assert!(jar.iter().count() == 2);
        assert_eq!(jar.get("c1").expect("should have c1").value(), "v1");
        assert_eq!(jar.get("c2").expect("should have c2").value(), "v2");
    }

    #[test]
    fn test_parse_cookies_to_jar_not_unique() {
        let cookie_str = "c1=v1;c1=v2";
        let jar = parse_cookies_to_jar(cookie_str);

        assert!(jar.iter().count() == 1);
        assert_eq!(jar.get("c1").expect("should have c1").value(), "v2");
    }

    #[test]
    fn test_parse_cookies_to_jar_emtpy() {
        let jar = parse_cookies_to_jar("");
        assert!(jar.iter().count() == 0);
    }

    #[test]
    fn test_parse_cookies_to_jar_invalid() {
        let jar = parse_cookies_to_jar("invalid");
        assert!(jar.iter().count() == 0);
    }

    #[test]
    fn test_cookie_value_reads_named_cookie() {
        let jar = parse_cookies_to_jar("cb=user-42; other=x");
        assert_eq!(cookie_value(&jar, "cb"), Some("user-42".to_string()));
        assert_eq!(cookie_value(&jar, "missing"), None);
    }

    #[test]
    fn test_cookie_value_empty_is_absent() {
        let jar = parse_cookies_to_jar("cb=; other=x");
        assert_eq!(cookie_value(&jar, "cb"), None);
    }
}
