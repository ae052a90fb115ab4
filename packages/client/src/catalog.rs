//! The operation catalog.
//!
//! Every logical operation is one row: the parameter keys extracted as
//! positional arguments (in order), the remote call name (fixed, or a
//! DNS-record template resolved from the bag's `type` entry), and whether
//! the leftover bag is forwarded as a trailing structured argument. The
//! whole catalog is a single `operations!` table; the macro expands it
//! into the [`Operation`] enum, its descriptors, and one gateway method
//! per row.

use std::borrow::Cow;

use ispconfig_core::{Fault, ParamBag, RecordType, RecordTypeError};

use crate::gateway::Gateway;

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// The fixed recipe for one logical operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    /// Parameter keys extracted from the bag, in positional-argument order.
    pub keys: &'static [&'static str],
    /// How the remote call name is obtained.
    pub call: CallKind,
    /// Whether the leftover bag is forwarded as the trailing argument.
    pub forward_params: bool,
}

/// Remote call naming: a fixed name, or the DNS record template
/// `dns_<type>_<verb>` resolved per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Fixed(&'static str),
    DnsRecord(RecordVerb),
}

/// The verb half of a DNS record call name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordVerb {
    Add,
    Delete,
    Get,
    Update,
}

impl RecordVerb {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RecordVerb::Add => "add",
            RecordVerb::Delete => "delete",
            RecordVerb::Get => "get",
            RecordVerb::Update => "update",
        }
    }
}

impl CallKind {
    /// Resolves the concrete remote call name for this invocation.
    ///
    /// The DNS record template reads the bag's `type` entry without
    /// removing it, so the type still reaches the remote call inside the
    /// forwarded payload.
    ///
    /// # Errors
    ///
    /// Returns a local fault when the template needs a `type` entry that
    /// is absent (`missing_record_type`) or names no known record family
    /// (`unknown_record_type`).
    pub fn resolve(self, bag: &ParamBag) -> Result<Cow<'static, str>, Fault> {
        match self {
            CallKind::Fixed(name) => Ok(Cow::Borrowed(name)),
            CallKind::DnsRecord(verb) => {
                let Some(raw) = bag.peek("type") else {
                    return Err(Fault::new(
                        "missing_record_type",
                        "DNS record operations require a `type` parameter",
                    ));
                };
                let Some(name) = raw.as_str() else {
                    return Err(Fault::new(
                        "unknown_record_type",
                        format!("DNS record type must be a string, got {raw}"),
                    ));
                };
                let record: RecordType = name
                    .parse()
                    .map_err(|err: RecordTypeError| {
                        Fault::new("unknown_record_type", err.to_string())
                    })?;
                Ok(Cow::Owned(format!("dns_{}_{}", record.as_str(), verb.as_str())))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// The catalog table
// ---------------------------------------------------------------------------

macro_rules! call_kind {
    ((fixed $name:literal)) => {
        CallKind::Fixed($name)
    };
    ((dns $verb:ident)) => {
        CallKind::DnsRecord(RecordVerb::$verb)
    };
}

macro_rules! operations {
    ($( $variant:ident => $method:ident, $call:tt, [$($key:literal),*], $forward:literal; )*) => {
        /// One logical operation per remote call family, in catalog order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Operation {
            $( $variant, )*
        }

        impl Operation {
            /// Every catalogued operation, in declaration order.
            pub const ALL: &'static [Operation] = &[ $( Operation::$variant, )* ];

            /// The dispatch recipe for this operation.
            #[must_use]
            pub fn descriptor(self) -> Descriptor {
                match self {
                    $(
                        Operation::$variant => Descriptor {
                            keys: &[ $( $key, )* ],
                            call: call_kind!($call),
                            forward_params: $forward,
                        },
                    )*
                }
            }
        }

        impl Gateway {
            $(
                pub async fn $method(&mut self) -> &mut Self {
                    self.invoke(Operation::$variant).await
                }
            )*
        }
    };
}

operations! {
    // Clients. `update_client` really does invoke remote `client_add` with
    // (client_id, reseller_id, payload); the upstream API wrapper has
    // always mapped it that way.
    AddClient => add_client, (fixed "client_add"), ["reseller_id"], true;
    ChangeClientPassword => change_client_password, (fixed "client_change_password"), ["client_id", "password"], false;
    DeleteClient => delete_client, (fixed "client_delete"), ["client_id"], false;
    GetClient => get_client, (fixed "client_get"), ["client_id"], false;
    GetClientByUsername => get_client_by_username, (fixed "client_get_by_username"), ["username"], false;
    GetClientId => get_client_id, (fixed "client_get_id"), ["user_id"], false;
    GetClientSites => get_client_sites, (fixed "client_get_sites_by_user"), ["user_id"], false;
    GetClientTemplates => get_client_templates, (fixed "client_templates_get_all"), ["user_id"], false;
    UpdateClient => update_client, (fixed "client_add"), ["client_id", "reseller_id"], true;

    // DNS records: call name resolved from the bag's `type` entry.
    AddDnsRecord => add_dns_record, (dns Add), ["client_id"], true;
    DeleteDnsRecord => delete_dns_record, (dns Delete), ["client_id"], true;
    GetDnsRecord => get_dns_record, (dns Get), ["client_id"], true;
    UpdateDnsRecord => update_dns_record, (dns Update), ["client_id"], true;

    // DNS zones.
    AddDnsZone => add_dns_zone, (fixed "dns_zone_add"), ["client_id"], true;
    DeleteDnsZone => delete_dns_zone, (fixed "dns_zone_delete"), ["zone_id"], false;
    GetDnsZone => get_dns_zone, (fixed "dns_zone_get"), ["zone_id"], false;
    GetDnsZonesByUser => get_dns_zones_by_user, (fixed "dns_zone_get_by_user"), ["client_id", "server_id"], false;
    SetDnsZoneStatus => set_dns_zone_status, (fixed "dns_zone_set_status"), ["zone_id", "status"], false;
    UpdateDnsZone => update_dns_zone, (fixed "dns_zone_update"), ["client_id", "zone_id"], true;

    // Registrar domains.
    AddDnsDomain => add_dns_domain, (fixed "domains_domain_add"), ["client_id"], true;
    DeleteDnsDomain => delete_dns_domain, (fixed "domains_domain_delete"), ["domain_id"], false;
    GetDnsDomain => get_dns_domain, (fixed "domains_domain_get"), ["domain_id"], false;
    GetUserDnsDomains => get_user_dns_domains, (fixed "domains_get_all_by_user"), ["user_id"], false;

    // Mail aliases.
    AddMailAlias => add_mail_alias, (fixed "mail_alias_add"), ["client_id"], true;
    DeleteMailAlias => delete_mail_alias, (fixed "mail_alias_delete"), ["alias_id"], false;
    GetMailAlias => get_mail_alias, (fixed "mail_alias_get"), ["alias_id"], false;
    UpdateMailAlias => update_mail_alias, (fixed "mail_alias_update"), ["client_id", "alias_id"], true;

    // Mail blacklists.
    AddMailBlacklist => add_mail_blacklist, (fixed "mail_blacklist_add"), ["client_id"], true;
    DeleteMailBlacklist => delete_mail_blacklist, (fixed "mail_blacklist_delete"), ["blacklist_id"], false;
    GetMailBlacklist => get_mail_blacklist, (fixed "mail_blacklist_get"), ["blacklist_id"], false;
    UpdateMailBlacklist => update_mail_blacklist, (fixed "mail_blacklist_update"), ["client_id", "blacklist_id"], true;

    // Mail catchalls.
    AddMailCatchall => add_mail_catchall, (fixed "mail_catchall_add"), ["client_id"], true;
    DeleteMailCatchall => delete_mail_catchall, (fixed "mail_catchall_delete"), ["catchall_id"], false;
    GetMailCatchall => get_mail_catchall, (fixed "mail_catchall_get"), ["catchall_id"], false;
    UpdateMailCatchall => update_mail_catchall, (fixed "mail_catchall_update"), ["client_id", "catchall_id"], true;

    // Mail domains.
    AddMailDomain => add_mail_domain, (fixed "mail_domain_add"), ["client_id"], true;
    DeleteMailDomain => delete_mail_domain, (fixed "mail_domain_delete"), ["domain_id"], false;
    GetMailDomain => get_mail_domain, (fixed "mail_domain_get"), ["domain_id"], false;
    GetMailDomainByDomain => get_mail_domain_by_domain, (fixed "mail_domain_get_by_domain"), ["domain_name"], false;
    UpdateMailDomain => update_mail_domain, (fixed "mail_domain_update"), ["client_id", "domain_id"], true;

    // Fetchmail accounts.
    AddMailFetchmail => add_mail_fetchmail, (fixed "mail_fetchmail_add"), ["client_id"], true;
    DeleteMailFetchmail => delete_mail_fetchmail, (fixed "mail_fetchmail_delete"), ["fetchmail_id"], false;
    GetMailFetchmail => get_mail_fetchmail, (fixed "mail_fetchmail_get"), ["fetchmail_id"], false;
    UpdateMailFetchmail => update_mail_fetchmail, (fixed "mail_fetchmail_update"), ["client_id", "fetchmail_id"], true;

    // Mail forwards.
    AddMailForward => add_mail_forward, (fixed "mail_forward_add"), ["client_id"], true;
    DeleteMailForward => delete_mail_forward, (fixed "mail_forward_delete"), ["forward_id"], false;
    GetMailForward => get_mail_forward, (fixed "mail_forward_get"), ["forward_id"], false;
    UpdateMailForward => update_mail_forward, (fixed "mail_forward_update"), ["client_id", "forward_id"], true;

    // Mailing lists.
    AddMailinglist => add_mailinglist, (fixed "mail_mailinglist_add"), ["client_id"], true;
    DeleteMailinglist => delete_mailinglist, (fixed "mail_mailinglist_delete"), ["mailinglist_id"], false;
    GetMailinglist => get_mailinglist, (fixed "mail_mailinglist_get"), ["mailinglist_id"], false;
    UpdateMailinglist => update_mailinglist, (fixed "mail_mailinglist_update"), ["client_id", "mailinglist_id"], true;

    // Mail policies.
    AddMailPolicy => add_mail_policy, (fixed "mail_policy_add"), ["client_id"], true;
    DeleteMailPolicy => delete_mail_policy, (fixed "mail_policy_delete"), ["policy_id"], false;
    GetMailPolicy => get_mail_policy, (fixed "mail_policy_get"), ["policy_id"], false;
    UpdateMailPolicy => update_mail_policy, (fixed "mail_policy_update"), ["client_id", "policy_id"], true;

    // Spamfilter blacklists.
    AddSpamfilterBlacklist => add_spamfilter_blacklist, (fixed "mail_spamfilter_blacklist_add"), ["client_id"], true;
    DeleteSpamfilterBlacklist => delete_spamfilter_blacklist, (fixed "mail_spamfilter_blacklist_delete"), ["spamfilterblacklist_id"], false;
    GetSpamfilterBlacklist => get_spamfilter_blacklist, (fixed "mail_spamfilter_blacklist_get"), ["spamfilterblacklist_id"], false;
    UpdateSpamfilterBlacklist => update_spamfilter_blacklist, (fixed "mail_spamfilter_blacklist_update"), ["client_id", "spamfilterblacklist_id"], true;

    // Spamfilter users.
    AddSpamfilterUser => add_spamfilter_user, (fixed "mail_spamfilter_user_add"), ["client_id"], true;
    DeleteSpamfilterUser => delete_spamfilter_user, (fixed "mail_spamfilter_user_delete"), ["spamfilteruser_id"], false;
    GetSpamfilterUser => get_spamfilter_user, (fixed "mail_spamfilter_user_get"), ["spamfilteruser_id"], false;
    UpdateSpamfilterUser => update_spamfilter_user, (fixed "mail_spamfilter_user_update"), ["client_id", "spamfilteruser_id"], true;

    // Spamfilter whitelists.
    AddSpamfilterWhitelist => add_spamfilter_whitelist, (fixed "mail_spamfilter_whitelist_add"), ["client_id"], true;
    DeleteSpamfilterWhitelist => delete_spamfilter_whitelist, (fixed "mail_spamfilter_whitelist_delete"), ["spamfilterwhitelist_id"], false;
    GetSpamfilterWhitelist => get_spamfilter_whitelist, (fixed "mail_spamfilter_whitelist_get"), ["spamfilterwhitelist_id"], false;
    UpdateSpamfilterWhitelist => update_spamfilter_whitelist, (fixed "mail_spamfilter_whitelist_update"), ["client_id", "spamfilterwhitelist_id"], true;

    // Mail transports.
    AddMailTransport => add_mail_transport, (fixed "mail_transport_add"), ["client_id"], true;
    DeleteMailTransport => delete_mail_transport, (fixed "mail_transport_delete"), ["transport_id"], false;
    GetMailTransport => get_mail_transport, (fixed "mail_transport_get"), ["transport_id"], false;
    UpdateMailTransport => update_mail_transport, (fixed "mail_transport_update"), ["client_id", "transport_id"], true;

    // Mail users.
    AddMailUser => add_mail_user, (fixed "mail_user_add"), ["client_id"], true;
    DeleteMailUser => delete_mail_user, (fixed "mail_user_delete"), ["user_id"], false;
    GetMailUser => get_mail_user, (fixed "mail_user_get"), ["user_id"], false;
    UpdateMailUser => update_mail_user, (fixed "mail_user_update"), ["client_id", "user_id"], true;

    // Mail user filters.
    AddMailUserFilter => add_mail_user_filter, (fixed "mail_user_filter_add"), ["client_id"], true;
    DeleteMailUserFilter => delete_mail_user_filter, (fixed "mail_user_filter_delete"), ["userfilter_id"], false;
    GetMailUserFilter => get_mail_user_filter, (fixed "mail_user_filter_get"), ["userfilter_id"], false;
    UpdateMailUserFilter => update_mail_user_filter, (fixed "mail_user_filter_update"), ["client_id", "userfilter_id"], true;

    // Mail whitelists.
    AddMailWhitelist => add_mail_whitelist, (fixed "mail_whitelist_add"), ["client_id"], true;
    DeleteMailWhitelist => delete_mail_whitelist, (fixed "mail_whitelist_delete"), ["whitelist_id"], false;
    GetMailWhitelist => get_mail_whitelist, (fixed "mail_whitelist_get"), ["whitelist_id"], false;
    UpdateMailWhitelist => update_mail_whitelist, (fixed "mail_whitelist_update"), ["client_id", "whitelist_id"], true;

    // Server inventory.
    GetServer => get_server, (fixed "server_get"), ["server_id"], false;
    GetServerByIp => get_server_by_ip, (fixed "server_get_serverid_by_ip"), ["ip_address"], false;

    // Cron jobs.
    AddCron => add_cron, (fixed "sites_cron_add"), ["client_id"], true;
    DeleteCron => delete_cron, (fixed "sites_cron_delete"), ["cron_id"], false;
    GetCron => get_cron, (fixed "sites_cron_get"), ["cron_id"], false;
    UpdateCron => update_cron, (fixed "sites_cron_update"), ["client_id", "cron_id"], true;

    // Databases.
    AddDatabase => add_database, (fixed "sites_database_add"), ["client_id"], true;
    DeleteDatabase => delete_database, (fixed "sites_database_delete"), ["database_id"], false;
    GetDatabase => get_database, (fixed "sites_database_get"), ["database_id"], false;
    GetDatabasesByUser => get_databases_by_user, (fixed "sites_database_get_all_by_user"), ["client_id"], false;
    UpdateDatabase => update_database, (fixed "sites_database_update"), ["client_id", "database_id"], true;

    // Database users.
    AddDatabaseUser => add_database_user, (fixed "sites_database_user_add"), ["client_id"], true;
    DeleteDatabaseUser => delete_database_user, (fixed "sites_database_user_delete"), ["databaseuser_id"], false;
    GetDatabaseUser => get_database_user, (fixed "sites_database_user_get"), ["databaseuser_id"], false;
    UpdateDatabaseUser => update_database_user, (fixed "sites_database_user_update"), ["client_id", "databaseuser_id"], true;

    // FTP users.
    AddFtpUser => add_ftp_user, (fixed "sites_ftp_user_add"), ["client_id"], true;
    DeleteFtpUser => delete_ftp_user, (fixed "sites_ftp_user_delete"), ["ftpuser_id"], false;
    GetFtpUser => get_ftp_user, (fixed "sites_ftp_user_get"), ["ftpuser_id"], false;
    UpdateFtpUser => update_ftp_user, (fixed "sites_ftp_user_update"), ["client_id", "ftpuser_id"], true;

    // Shell users.
    AddShellUser => add_shell_user, (fixed "sites_shell_user_add"), ["client_id"], true;
    DeleteShellUser => delete_shell_user, (fixed "sites_shell_user_delete"), ["shelluser_id"], false;
    GetShellUser => get_shell_user, (fixed "sites_shell_user_get"), ["shelluser_id"], false;
    UpdateShellUser => update_shell_user, (fixed "sites_shell_user_update"), ["client_id", "shelluser_id"], true;

    // Web alias domains.
    AddAliasDomain => add_alias_domain, (fixed "sites_web_aliasdomain_add"), ["client_id"], true;
    DeleteAliasDomain => delete_alias_domain, (fixed "sites_web_aliasdomain_delete"), ["aliasdomain_id"], false;
    GetAliasDomain => get_alias_domain, (fixed "sites_web_aliasdomain_get"), ["aliasdomain_id"], false;
    UpdateAliasDomain => update_alias_domain, (fixed "sites_web_aliasdomain_update"), ["client_id", "aliasdomain_id"], true;

    // Web vhost domains.
    AddWebDomain => add_web_domain, (fixed "sites_web_domain_add"), ["client_id"], true;
    DeleteWebDomain => delete_web_domain, (fixed "sites_web_domain_delete"), ["domain_id"], false;
    GetWebDomain => get_web_domain, (fixed "sites_web_domain_get"), ["domain_id"], false;
    SetWebDomainStatus => set_web_domain_status, (fixed "sites_web_domain_set_status"), ["domain_id", "status"], false;
    UpdateWebDomain => update_web_domain, (fixed "sites_web_domain_update"), ["client_id", "domain_id"], true;

    // Web subdomains.
    AddWebSubdomain => add_web_subdomain, (fixed "sites_web_subdomain_add"), ["client_id"], true;
    DeleteWebSubdomain => delete_web_subdomain, (fixed "sites_web_subdomain_delete"), ["subdomain_id"], false;
    GetWebSubdomain => get_web_subdomain, (fixed "sites_web_subdomain_get"), ["subdomain_id"], false;
    UpdateWebSubdomain => update_web_subdomain, (fixed "sites_web_subdomain_update"), ["client_id", "subdomain_id"], true;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
