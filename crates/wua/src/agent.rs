//! COM session against the Windows Update Agent.
//!
//! All `IUpdate` handles live and die with the search result that
//! produced them; `UpdateId` arguments index into that result. The
//! service must stay on the thread that called `connect`.

use update_core::{
    InstallReport, OperationResult, ServiceError, UpdateId, UpdateRecord, UpdateResult,
    UpdateService,
};
use windows::core::BSTR;
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CLSCTX_INPROC_SERVER, COINIT_MULTITHREADED,
};
use windows::Win32::System::UpdateAgent::{
    IUpdate, IUpdateCollection, IUpdateSession, UpdateCollection, UpdateSession,
};

const CLIENT_APPLICATION_ID: &str = "Manual Windows Update";

pub struct WuaService {
    session: IUpdateSession,
    /// Handles from the most recent search, indexed by `UpdateId`.
    updates: Vec<IUpdate>,
}

impl WuaService {
    /// Initializes COM on the calling thread and creates the update
    /// session with our client application id.
    pub fn connect() -> Result<Self, ServiceError> {
        unsafe {
            // S_FALSE (already initialized) is fine here.
            CoInitializeEx(None, COINIT_MULTITHREADED)
                .ok()
                .map_err(com_err)?;
            let session: IUpdateSession =
                CoCreateInstance(&UpdateSession, None, CLSCTX_INPROC_SERVER).map_err(com_err)?;
            session
                .SetClientApplicationID(&BSTR::from(CLIENT_APPLICATION_ID))
                .map_err(com_err)?;
            Ok(Self {
                session,
                updates: Vec::new(),
            })
        }
    }

    fn update(&self, id: UpdateId) -> Result<&IUpdate, ServiceError> {
        self.updates.get(id.0).ok_or_else(|| {
            ServiceError::Service(format!(
                "update index {} is not part of the current search result",
                id.0
            ))
        })
    }

    /// Assembles an update collection from the given search-result ids.
    fn collect(&self, ids: &[UpdateId]) -> Result<IUpdateCollection, ServiceError> {
        unsafe {
            let collection: IUpdateCollection =
                CoCreateInstance(&UpdateCollection, None, CLSCTX_INPROC_SERVER)
                    .map_err(com_err)?;
            for id in ids {
                collection.Add(self.update(*id)?).map_err(com_err)?;
            }
            Ok(collection)
        }
    }
}

impl UpdateService for WuaService {
    fn search(&mut self, criteria: &str) -> Result<Vec<UpdateRecord>, ServiceError> {
        unsafe {
            let searcher = self.session.CreateUpdateSearcher().map_err(com_err)?;
            let result = searcher.Search(&BSTR::from(criteria)).map_err(com_err)?;
            let updates = result.Updates().map_err(com_err)?;
            let count = updates.Count().map_err(com_err)?;

            let mut handles = Vec::with_capacity(count as usize);
            let mut records = Vec::with_capacity(count as usize);
            for index in 0..count {
                let update = updates.get_Item(index).map_err(com_err)?;
                records.push(snapshot(&update)?);
                handles.push(update);
            }
            self.updates = handles;
            Ok(records)
        }
    }

    fn accept_eula(&mut self, id: UpdateId) -> Result<(), ServiceError> {
        unsafe { self.update(id)?.AcceptEula().map_err(com_err) }
    }

    fn download(&mut self, ids: &[UpdateId]) -> Result<(), ServiceError> {
        unsafe {
            let set = self.collect(ids)?;
            let downloader = self.session.CreateUpdateDownloader().map_err(com_err)?;
            downloader.SetUpdates(&set).map_err(com_err)?;
            downloader.Download().map(|_| ()).map_err(com_err)
        }
    }

    fn install(&mut self, ids: &[UpdateId]) -> Result<InstallReport, ServiceError> {
        unsafe {
            let set = self.collect(ids)?;
            let installer = self.session.CreateUpdateInstaller().map_err(com_err)?;
            installer.SetUpdates(&set).map_err(com_err)?;
            let outcome = installer.Install().map_err(com_err)?;

            let mut updates = Vec::with_capacity(ids.len());
            for (index, id) in ids.iter().enumerate() {
                let per_update = outcome.GetUpdateResult(index as i32).map_err(com_err)?;
                updates.push(UpdateResult {
                    result: OperationResult::from_code(
                        per_update.ResultCode().map_err(com_err)?.0,
                    ),
                    title: self.update(*id)?.Title().map_err(com_err)?.to_string(),
                });
            }
            Ok(InstallReport {
                overall: OperationResult::from_code(outcome.ResultCode().map_err(com_err)?.0),
                reboot_required: outcome.RebootRequired().map_err(com_err)?.as_bool(),
                updates,
            })
        }
    }
}

/// Captures one `IUpdate` (and its bundled children) as plain data.
/// Optional metadata that the agent reports as null or refuses to return
/// is treated as absent rather than as a failure.
fn snapshot(update: &IUpdate) -> Result<UpdateRecord, ServiceError> {
    unsafe {
        let behavior = update.InstallationBehavior().map_err(com_err)?;
        let mut record = UpdateRecord {
            title: update.Title().map_err(com_err)?.to_string(),
            description: optional_text(update.Description().map_err(com_err)?),
            more_info_urls: Vec::new(),
            eula_text: optional_text(update.EulaText().map_err(com_err)?),
            eula_accepted: update.EulaAccepted().map_err(com_err)?.as_bool(),
            is_mandatory: update.IsMandatory().map_err(com_err)?.as_bool(),
            requires_user_input: behavior.CanRequestUserInput().map_err(com_err)?.as_bool(),
            reboot_behavior: behavior.RebootBehavior().map_err(com_err)?.0,
            bundled: Vec::new(),
        };
        if let Ok(urls) = update.MoreInfoUrls() {
            for index in 0..urls.Count().map_err(com_err)? {
                record
                    .more_info_urls
                    .push(urls.get_Item(index).map_err(com_err)?.to_string());
            }
        }
        if let Ok(bundle) = update.BundledUpdates() {
            for index in 0..bundle.Count().map_err(com_err)? {
                let child = bundle.get_Item(index).map_err(com_err)?;
                record.bundled.push(snapshot(&child)?);
            }
        }
        Ok(record)
    }
}

fn optional_text(value: BSTR) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn com_err(err: windows::core::Error) -> ServiceError {
    ServiceError::Service(format!("0x{:08X}: {}", err.code().0, err.message()))
}
